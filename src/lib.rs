//! pricewatch: price monitoring and alert engine for a single tracked asset
//!
//! This library provides the core components for:
//! - Price fetching with primary/secondary provider fallback
//! - In-memory per-subscriber alert configuration
//! - Percentage-change and max/min target alert evaluation
//! - Fixed-interval polling with non-overlapping passes
//! - Pluggable notification sinks
//! - Logging and Prometheus metrics

pub mod alert;
pub mod cli;
pub mod config;
pub mod feed;
pub mod history;
pub mod monitor;
pub mod notify;
pub mod subscriber;
pub mod telemetry;
