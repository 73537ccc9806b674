//! Price feed types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Raw quote returned by a single provider
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Asset price in the reference currency
    pub price: Decimal,
    /// 24h change in percent, 0 when the provider omits it
    pub change_24h: Decimal,
    /// Market capitalisation, if reported
    pub market_cap: Option<Decimal>,
}

/// A single price observation of the tracked asset
///
/// Built once per poll and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Asset price in the reference currency (always positive)
    pub price: Decimal,
    /// 24h change in percent as reported by the provider (informational)
    pub change_24h: Decimal,
    /// Market capitalisation (cosmetic metadata)
    pub market_cap: Option<Decimal>,
    /// Provider that produced this observation
    pub source: String,
    /// Local timestamp of the fetch
    pub observed_at: DateTime<Utc>,
}

impl PriceObservation {
    /// Create an observation stamped with the current time
    pub fn new(price: Decimal, change_24h: Decimal) -> Self {
        Self {
            price,
            change_24h,
            market_cap: None,
            source: String::new(),
            observed_at: Utc::now(),
        }
    }

    /// Build an observation from a provider quote
    pub fn from_quote(quote: Quote, source: impl Into<String>) -> Self {
        Self {
            price: quote.price,
            change_24h: quote.change_24h,
            market_cap: quote.market_cap,
            source: source.into(),
            observed_at: Utc::now(),
        }
    }
}

/// Price feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport or body decoding failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Provider answered with a non-success status
    #[error("{provider} returned status {status}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
    },
    /// Payload did not contain the expected field
    #[error("{provider} payload is missing {field}")]
    MissingField {
        provider: &'static str,
        field: &'static str,
    },
    /// Price field present but not a positive number
    #[error("{provider} returned an unusable price: {raw}")]
    InvalidPrice { provider: &'static str, raw: String },
    /// Both primary and secondary providers failed
    #[error("no price source available (primary: {primary}; secondary: {secondary})")]
    SourceUnavailable {
        primary: Box<FeedError>,
        secondary: Box<FeedError>,
    },
}

/// Read a decimal from a JSON number or numeric string
pub(crate) fn decimal_from_json(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => parse_decimal(&n.to_string()),
        serde_json::Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Validate a raw price value, rejecting anything that is not a positive number
pub(crate) fn positive_price(
    provider: &'static str,
    value: &serde_json::Value,
) -> Result<Decimal, FeedError> {
    match decimal_from_json(value) {
        Some(price) if price > Decimal::ZERO => Ok(price),
        _ => Err(FeedError::InvalidPrice {
            provider,
            raw: value.to_string(),
        }),
    }
}
