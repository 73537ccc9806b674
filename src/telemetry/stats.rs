//! Prometheus metrics recorded through the `metrics` facade

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::time::Duration;

/// Outcome of a single tick, used as a metric label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Pass ran to completion
    Completed,
    /// Both providers failed, cycle skipped
    SourceUnavailable,
    /// Previous pass still running, tick dropped
    Busy,
}

impl PassOutcome {
    fn label(self) -> &'static str {
        match self {
            PassOutcome::Completed => "completed",
            PassOutcome::SourceUnavailable => "source_unavailable",
            PassOutcome::Busy => "busy",
        }
    }
}

/// Record a provider fetch
pub fn record_fetch(provider: &'static str, duration: Duration, success: bool) {
    let result = if success { "ok" } else { "error" };
    metrics::histogram!("pricewatch_fetch_latency_ms", "provider" => provider)
        .record(duration.as_secs_f64() * 1000.0);
    metrics::counter!("pricewatch_fetch_total", "provider" => provider, "result" => result)
        .increment(1);
}

/// Record the outcome of a tick
pub fn record_pass(outcome: PassOutcome) {
    metrics::counter!("pricewatch_poll_passes_total", "outcome" => outcome.label()).increment(1);
}

/// Record emitted events of one kind
pub fn record_event(kind: &'static str) {
    metrics::counter!("pricewatch_events_total", "kind" => kind).increment(1);
}

/// Record a failed notification delivery
pub fn record_delivery_failure() {
    metrics::counter!("pricewatch_delivery_failures_total").increment(1);
}

/// Set the subscriber count gauge
pub fn set_subscriber_count(count: usize) {
    metrics::gauge!("pricewatch_subscribers").set(count as f64);
}

/// Set the last committed price gauge
pub fn set_last_price(price: Decimal) {
    if let Some(value) = price.to_f64() {
        metrics::gauge!("pricewatch_last_price").set(value);
    }
}
