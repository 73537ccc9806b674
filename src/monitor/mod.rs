//! Price monitor module
//!
//! Fixed-interval scheduler tying the price source, subscriber store,
//! alert evaluator and notification sink together.

mod engine;
mod types;

pub use engine::PriceMonitor;
pub use types::{MonitorStatus, PassSummary, TickOutcome};
