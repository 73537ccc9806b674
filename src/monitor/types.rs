//! Monitor result types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Summary of a completed poll pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassSummary {
    /// Price committed at the end of the pass
    pub price: Decimal,
    /// Reference price the pass compared against
    pub previous_price: Option<Decimal>,
    /// Number of subscribers evaluated
    pub subscribers: usize,
    /// Number of events produced
    pub events: usize,
    /// Number of events whose delivery failed
    pub delivery_failures: usize,
}

/// What a tick did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TickOutcome {
    /// Fetch, evaluation, dispatch and commit all ran
    Completed(PassSummary),
    /// No provider had a price; nothing evaluated, history unchanged
    SourceUnavailable,
    /// A pass was already in flight; this tick was dropped
    Busy,
}

/// Liveness snapshot of the monitor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorStatus {
    pub subscribers: usize,
    pub last_price: Option<Decimal>,
    pub last_update: Option<DateTime<Utc>>,
}
