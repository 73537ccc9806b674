//! Distance-to-target report for a subscriber

use super::evaluator::change_percent;
use crate::feed::PriceObservation;
use crate::subscriber::{AlertConfig, TargetSide};
use rust_decimal::Decimal;
use serde::Serialize;

/// Status of one configured target relative to the current price
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetStatus {
    pub side: TargetSide,
    pub target: Decimal,
    /// Signed distance from the current price to the target, in percent;
    /// absent when it does not fit in a `Decimal`
    pub distance_pct: Option<Decimal>,
    /// Whether the current price is already at or beyond the target
    pub reached: bool,
    /// Latch state of the alert
    pub triggered: bool,
}

/// Current price and the state of each configured target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetReport {
    pub observation: PriceObservation,
    pub max: Option<TargetStatus>,
    pub min: Option<TargetStatus>,
}

impl TargetReport {
    pub fn new(config: &AlertConfig, observation: PriceObservation) -> Self {
        let max = Self::status(config, TargetSide::Max, &observation);
        let min = Self::status(config, TargetSide::Min, &observation);
        Self {
            observation,
            max,
            min,
        }
    }

    fn status(
        config: &AlertConfig,
        side: TargetSide,
        observation: &PriceObservation,
    ) -> Option<TargetStatus> {
        let target = config.target(side)?;
        let price = observation.price;
        let reached = match side {
            TargetSide::Max => price >= target,
            TargetSide::Min => price <= target,
        };
        Some(TargetStatus {
            side,
            target,
            distance_pct: change_percent(Some(price), target),
            reached,
            triggered: config.triggered(side),
        })
    }
}
