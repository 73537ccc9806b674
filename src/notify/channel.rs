//! Sink that forwards events to a transport task over a channel

use super::NotificationSink;
use crate::alert::NotificationEvent;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Pushes events into a bounded channel
pub struct ChannelSink {
    tx: mpsc::Sender<NotificationEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its event stream
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<NotificationEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl NotificationSink for ChannelSink {
    async fn deliver(&self, event: &NotificationEvent) -> anyhow::Result<()> {
        self.tx
            .send(event.clone())
            .await
            .map_err(|_| anyhow::anyhow!("notification receiver dropped"))
    }
}
