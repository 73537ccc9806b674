//! Last observed price, shared between poll passes

use crate::feed::PriceObservation;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::RwLock;

/// Point-in-time view of the price history
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceHistorySnapshot {
    /// Price from the last successful poll
    pub last_price: Option<Decimal>,
    /// When the last successful poll was committed
    pub last_update: Option<DateTime<Utc>>,
}

/// Holds the most recent committed observation
#[derive(Default)]
pub struct PriceHistory {
    snapshot: RwLock<PriceHistorySnapshot>,
}

impl PriceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> PriceHistorySnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn last_price(&self) -> Option<Decimal> {
        self.snapshot.read().await.last_price
    }

    /// Record an observation as the new reference price
    pub async fn commit(&self, observation: &PriceObservation) {
        let mut snapshot = self.snapshot.write().await;
        snapshot.last_price = Some(observation.price);
        snapshot.last_update = Some(observation.observed_at);
    }
}
