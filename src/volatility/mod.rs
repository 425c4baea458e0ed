//! Volatility index classification
//!
//! Maps the latest index reading onto a discrete alert level and detects
//! two distinct alert bands being hit within one calendar day.

mod classifier;
mod observation;
mod types;

pub use classifier::{classify, dual_alert};
pub use observation::observe;
pub use types::{AlertLevel, DualAlert, Observation, ThresholdConfig};
