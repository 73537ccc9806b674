//! Alert evaluation module
//!
//! Decides, per subscriber, which notifications a new price observation
//! produces: percentage-change signals and max/min target crossings with
//! a 5% hysteresis band before a target can fire again.

mod evaluator;
mod report;
mod types;

pub use evaluator::{change_percent, evaluate, MAX_RESET_FACTOR, MIN_RESET_FACTOR};
pub use report::{TargetReport, TargetStatus};
pub use types::{Evaluation, NotificationEvent};
