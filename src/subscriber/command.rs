//! Canonical configuration commands
//!
//! Whatever textual convention the transport uses ("/pmax -1", "/pmax 0",
//! an inline button) maps onto one of these operations.

use super::types::{validate_target, validate_threshold};
use super::{AlertConfig, ConfigError, TargetSide};
use rust_decimal::Decimal;
use std::str::FromStr;

/// A change to a subscriber's alert settings
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigCommand {
    /// Turn all alerts on or off
    SetAlertsEnabled(bool),
    /// Change the percentage-move threshold
    SetThreshold(u32),
    /// Set a target price; re-arms its latch
    SetTarget { side: TargetSide, price: Decimal },
    /// Remove a target and its latch
    ClearTarget(TargetSide),
}

impl ConfigCommand {
    /// Parse a threshold from user input
    pub fn parse_threshold(raw: &str) -> Result<Self, ConfigError> {
        let threshold: u32 = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(raw.to_string()))?;
        validate_threshold(threshold)?;
        Ok(Self::SetThreshold(threshold))
    }

    /// Parse a target price from user input
    pub fn parse_target(side: TargetSide, raw: &str) -> Result<Self, ConfigError> {
        let price = Decimal::from_str(raw.trim())
            .map_err(|_| ConfigError::InvalidNumber(raw.to_string()))?;
        validate_target(price)?;
        Ok(Self::SetTarget { side, price })
    }

    /// Reject out-of-range values before they reach a stored config
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::SetThreshold(threshold) => validate_threshold(*threshold),
            Self::SetTarget { price, .. } => validate_target(*price),
            Self::SetAlertsEnabled(_) | Self::ClearTarget(_) => Ok(()),
        }
    }

    /// Apply the command to a config
    pub fn apply(&self, config: &mut AlertConfig) -> Result<(), ConfigError> {
        self.validate()?;

        match *self {
            Self::SetAlertsEnabled(enabled) => config.alerts_enabled = enabled,
            Self::SetThreshold(threshold) => config.change_threshold_pct = threshold,
            Self::SetTarget {
                side: TargetSide::Max,
                price,
            } => {
                config.max_target = Some(price);
                config.max_triggered = false;
            }
            Self::SetTarget {
                side: TargetSide::Min,
                price,
            } => {
                config.min_target = Some(price);
                config.min_triggered = false;
            }
            Self::ClearTarget(TargetSide::Max) => {
                config.max_target = None;
                config.max_triggered = false;
            }
            Self::ClearTarget(TargetSide::Min) => {
                config.min_target = None;
                config.min_triggered = false;
            }
        }

        Ok(())
    }
}
