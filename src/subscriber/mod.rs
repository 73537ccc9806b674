//! Subscriber module
//!
//! Per-subscriber alert settings, the commands that change them and the
//! in-memory store that owns them for the lifetime of the process.

mod command;
mod store;
mod types;

pub use command::ConfigCommand;
pub use store::SubscriberStore;
pub use types::{
    AlertConfig, ConfigError, SubscriberId, TargetSide, DEFAULT_THRESHOLD_PCT, MAX_THRESHOLD_PCT,
    MIN_THRESHOLD_PCT,
};
