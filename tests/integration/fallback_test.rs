//! Fallback source wired into the monitor

use crate::common::{RecordingSink, ScriptedProvider};
use pricewatch::feed::{FallbackSource, PriceSource};
use pricewatch::history::PriceHistory;
use pricewatch::monitor::{PriceMonitor, TickOutcome};
use pricewatch::subscriber::SubscriberStore;
use rust_decimal_macros::dec;
use std::sync::Arc;

#[tokio::test]
async fn test_secondary_fills_primary_gap() {
    let source = FallbackSource::new(
        Box::new(ScriptedProvider::new("primary", vec![Some(dec!(1)), None])),
        Box::new(ScriptedProvider::new("secondary", vec![Some(dec!(1.2))])),
    );

    let first = source.fetch().await.unwrap();
    assert_eq!(first.source, "primary");

    let second = source.fetch().await.unwrap();
    assert_eq!(second.source, "secondary");
    assert_eq!(second.price, dec!(1.2));
}

#[tokio::test]
async fn test_monitor_over_fallback_source() {
    let source = FallbackSource::new(
        Box::new(ScriptedProvider::new("primary", vec![None, None])),
        Box::new(ScriptedProvider::new("secondary", vec![Some(dec!(2))])),
    );
    let monitor = PriceMonitor::new(
        Arc::new(source),
        Arc::new(SubscriberStore::new()),
        Arc::new(PriceHistory::new()),
        Arc::new(RecordingSink::default()),
    );

    assert!(matches!(monitor.on_tick().await, TickOutcome::Completed(_)));
    assert_eq!(monitor.on_tick().await, TickOutcome::SourceUnavailable);
    assert_eq!(monitor.history().last_price().await, Some(dec!(2)));
}
