//! Alert event types

use crate::feed::PriceObservation;
use crate::subscriber::{AlertConfig, SubscriberId, TargetSide};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A notification produced by one evaluation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// Price moved at least the subscriber's threshold since the last poll
    ChangeSignal {
        subscriber: SubscriberId,
        observation: PriceObservation,
        /// Signed move in percent
        change_percent: Decimal,
    },
    /// Price crossed one of the subscriber's targets
    TargetHit {
        subscriber: SubscriberId,
        observation: PriceObservation,
        which: TargetSide,
        target: Decimal,
    },
}

impl NotificationEvent {
    /// Recipient of the event
    pub fn subscriber(&self) -> SubscriberId {
        match self {
            Self::ChangeSignal { subscriber, .. } | Self::TargetHit { subscriber, .. } => {
                *subscriber
            }
        }
    }

    /// Observation that produced the event
    pub fn observation(&self) -> &PriceObservation {
        match self {
            Self::ChangeSignal { observation, .. } | Self::TargetHit { observation, .. } => {
                observation
            }
        }
    }

    /// Metric/log label for the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChangeSignal { .. } => "change_signal",
            Self::TargetHit {
                which: TargetSide::Max,
                ..
            } => "target_max",
            Self::TargetHit {
                which: TargetSide::Min,
                ..
            } => "target_min",
        }
    }
}

impl fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChangeSignal {
                observation,
                change_percent,
                ..
            } => {
                let direction = if change_percent.is_sign_negative() {
                    "down"
                } else {
                    "up"
                };
                write!(
                    f,
                    "price {} {}% to {} (24h {}%)",
                    direction,
                    change_percent.abs().round_dp(2),
                    observation.price,
                    observation.change_24h.round_dp(2)
                )
            }
            Self::TargetHit {
                observation,
                which,
                target,
                ..
            } => {
                let relation = match which {
                    TargetSide::Max => "above",
                    TargetSide::Min => "below",
                };
                write!(
                    f,
                    "price {} is {} {} target {}",
                    observation.price, relation, which, target
                )
            }
        }
    }
}

/// Result of evaluating one subscriber
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Events to dispatch
    pub events: Vec<NotificationEvent>,
    /// Config with updated trigger latches, to be persisted
    pub config: AlertConfig,
}
