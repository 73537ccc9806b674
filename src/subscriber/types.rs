//! Subscriber and alert configuration types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default percentage move that triggers a change signal
pub const DEFAULT_THRESHOLD_PCT: u32 = 5;
/// Smallest accepted change threshold
pub const MIN_THRESHOLD_PCT: u32 = 1;
/// Largest accepted change threshold
pub const MAX_THRESHOLD_PCT: u32 = 100;

/// Identity of a subscriber (transport chat id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(pub i64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SubscriberId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Which price target an alert refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSide {
    /// Upper target, fires on an upward crossing
    Max,
    /// Lower target, fires on a downward crossing
    Min,
}

impl fmt::Display for TargetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSide::Max => write!(f, "max"),
            TargetSide::Min => write!(f, "min"),
        }
    }
}

/// Rejected configuration input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Threshold outside [1, 100]
    #[error("threshold must be between 1 and 100%, got {0}")]
    ThresholdOutOfRange(u32),
    /// Target price is zero or negative
    #[error("target price must be positive, got {0}")]
    NonPositiveTarget(Decimal),
    /// Input is not a number
    #[error("not a valid number: {0:?}")]
    InvalidNumber(String),
}

/// Per-subscriber alert settings and trigger latches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Global on/off switch for this subscriber
    pub alerts_enabled: bool,
    /// Minimum absolute move between consecutive polls, in percent
    pub change_threshold_pct: u32,
    /// Upper target price
    pub max_target: Option<Decimal>,
    /// Set once the upper target fired; cleared when price falls 5% below it
    pub max_triggered: bool,
    /// Lower target price
    pub min_target: Option<Decimal>,
    /// Set once the lower target fired; cleared when price rises 5% above it
    pub min_triggered: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD_PCT)
    }
}

impl AlertConfig {
    /// Fresh config with the given change threshold
    pub fn with_threshold(change_threshold_pct: u32) -> Self {
        Self {
            alerts_enabled: true,
            change_threshold_pct,
            max_target: None,
            max_triggered: false,
            min_target: None,
            min_triggered: false,
        }
    }

    /// Target level for a side
    pub fn target(&self, side: TargetSide) -> Option<Decimal> {
        match side {
            TargetSide::Max => self.max_target,
            TargetSide::Min => self.min_target,
        }
    }

    /// Latch state for a side
    pub fn triggered(&self, side: TargetSide) -> bool {
        match side {
            TargetSide::Max => self.max_triggered,
            TargetSide::Min => self.min_triggered,
        }
    }

    /// Check the threshold range and target positivity
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_threshold(self.change_threshold_pct)?;
        for target in [self.max_target, self.min_target].into_iter().flatten() {
            validate_target(target)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_threshold(threshold: u32) -> Result<(), ConfigError> {
    if (MIN_THRESHOLD_PCT..=MAX_THRESHOLD_PCT).contains(&threshold) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange(threshold))
    }
}

pub(crate) fn validate_target(target: Decimal) -> Result<(), ConfigError> {
    if target > Decimal::ZERO {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveTarget(target))
    }
}
