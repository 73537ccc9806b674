//! Sink that writes events to the log

use super::NotificationSink;
use crate::alert::NotificationEvent;
use async_trait::async_trait;

/// Logs every event at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(&self, event: &NotificationEvent) -> anyhow::Result<()> {
        tracing::info!(
            subscriber = %event.subscriber(),
            kind = event.kind(),
            source = %event.observation().source,
            "{}",
            event
        );
        Ok(())
    }
}
