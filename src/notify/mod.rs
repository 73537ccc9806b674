//! Notification delivery
//!
//! The monitor hands every event to a sink; rendering and transport live
//! behind this trait.

mod channel;
mod log_sink;

pub use channel::ChannelSink;
pub use log_sink::LogSink;

use crate::alert::NotificationEvent;
use async_trait::async_trait;

/// Delivers events to subscribers
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one event. Errors are logged by the caller and never retried.
    async fn deliver(&self, event: &NotificationEvent) -> anyhow::Result<()>;
}
