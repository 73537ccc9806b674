//! Shared test doubles

use async_trait::async_trait;
use pricewatch::alert::NotificationEvent;
use pricewatch::feed::{FeedError, PriceObservation, PriceProvider, PriceSource, Quote};
use pricewatch::history::PriceHistory;
use pricewatch::monitor::PriceMonitor;
use pricewatch::notify::NotificationSink;
use pricewatch::subscriber::SubscriberStore;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Provider replaying a script; `None` entries fail
pub struct ScriptedProvider {
    name: &'static str,
    quotes: Mutex<VecDeque<Option<Decimal>>>,
}

impl ScriptedProvider {
    pub fn new(name: &'static str, prices: Vec<Option<Decimal>>) -> Self {
        Self {
            name,
            quotes: Mutex::new(prices.into()),
        }
    }
}

#[async_trait]
impl PriceProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_quote(&self) -> Result<Quote, FeedError> {
        let next = self.quotes.lock().unwrap().pop_front().flatten();
        next.map(|price| Quote {
            price,
            change_24h: Decimal::ZERO,
            market_cap: None,
        })
        .ok_or(FeedError::MissingField {
            provider: self.name,
            field: "price",
        })
    }
}

/// Source replaying a script of prices; `None` entries fail
pub struct ScriptedSource {
    prices: Mutex<VecDeque<Option<Decimal>>>,
}

impl ScriptedSource {
    pub fn new(prices: Vec<Option<Decimal>>) -> Self {
        Self {
            prices: Mutex::new(prices.into()),
        }
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    async fn fetch(&self) -> Result<PriceObservation, FeedError> {
        let next = self.prices.lock().unwrap().pop_front().flatten();
        next.map(|price| PriceObservation::new(price, Decimal::ZERO))
            .ok_or(FeedError::MissingField {
                provider: "scripted",
                field: "price",
            })
    }
}

/// Sink that records events, optionally failing every delivery
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<NotificationEvent>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn take(&self) -> Vec<NotificationEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, event: &NotificationEvent) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        if self.fail {
            anyhow::bail!("transport unavailable");
        }
        Ok(())
    }
}

pub fn monitor_with(source: impl PriceSource + 'static, sink: Arc<RecordingSink>) -> PriceMonitor {
    PriceMonitor::new(
        Arc::new(source),
        Arc::new(SubscriberStore::new()),
        Arc::new(PriceHistory::new()),
        sink,
    )
}
