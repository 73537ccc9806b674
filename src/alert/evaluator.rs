//! Alert evaluation
//!
//! Pure decision logic: given one subscriber's config and the previous and
//! current price, decide which notifications to emit and how the trigger
//! latches change. Every rule sees the same inputs and the pre-mutation
//! config.

use super::{Evaluation, NotificationEvent};
use crate::feed::PriceObservation;
use crate::subscriber::{AlertConfig, SubscriberId, TargetSide};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fraction of the max target price falls below to re-arm the max alert
pub const MAX_RESET_FACTOR: Decimal = dec!(0.95);
/// Multiple of the min target price rises above to re-arm the min alert
pub const MIN_RESET_FACTOR: Decimal = dec!(1.05);

/// Percentage change from `last_price` to `price`
///
/// `None` when there is no usable reference price or the change does not
/// fit in a `Decimal`.
pub fn change_percent(last_price: Option<Decimal>, price: Decimal) -> Option<Decimal> {
    let last = last_price?;
    if last.is_zero() {
        return None;
    }
    price
        .checked_sub(last)?
        .checked_div(last)?
        .checked_mul(dec!(100))
}

/// Evaluate one subscriber against a new observation
pub fn evaluate(
    subscriber: SubscriberId,
    config: &AlertConfig,
    last_price: Option<Decimal>,
    observation: &PriceObservation,
) -> Evaluation {
    let mut events = Vec::new();
    let mut updated = config.clone();

    if !config.alerts_enabled {
        return Evaluation {
            events,
            config: updated,
        };
    }

    let price = observation.price;

    if let Some(change) = change_percent(last_price, price) {
        if change.abs() >= Decimal::from(config.change_threshold_pct) {
            events.push(NotificationEvent::ChangeSignal {
                subscriber,
                observation: observation.clone(),
                change_percent: change,
            });
        }
    }

    if let Some(target) = config.max_target {
        if !config.max_triggered && price >= target {
            events.push(NotificationEvent::TargetHit {
                subscriber,
                observation: observation.clone(),
                which: TargetSide::Max,
                target,
            });
            updated.max_triggered = true;
        }
        if config.max_triggered && below_max_band(price, target) {
            updated.max_triggered = false;
        }
    }

    if let Some(target) = config.min_target {
        if !config.min_triggered && price <= target {
            events.push(NotificationEvent::TargetHit {
                subscriber,
                observation: observation.clone(),
                which: TargetSide::Min,
                target,
            });
            updated.min_triggered = true;
        }
        if config.min_triggered && above_min_band(price, target) {
            updated.min_triggered = false;
        }
    }

    Evaluation {
        events,
        config: updated,
    }
}

fn below_max_band(price: Decimal, target: Decimal) -> bool {
    target
        .checked_mul(MAX_RESET_FACTOR)
        .is_some_and(|band| price < band)
}

// No price can exceed a band past Decimal::MAX, so the latch holds.
fn above_min_band(price: Decimal, target: Decimal) -> bool {
    target
        .checked_mul(MIN_RESET_FACTOR)
        .is_some_and(|band| price > band)
}
