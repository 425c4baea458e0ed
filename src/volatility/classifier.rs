//! Threshold classification

use super::{AlertLevel, DualAlert, ThresholdConfig};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Classify a reading against the thresholds
///
/// Checks run most-extreme first and the first match wins, so every value
/// lands in exactly one of six bands:
/// `[extreme_high, ∞)`, `[very_high, extreme_high)`, `[high, very_high)`,
/// `(-∞, extreme_low)`, `[extreme_low, low)` and the normal band `[low, high)`.
pub fn classify(value: Decimal, thresholds: &ThresholdConfig) -> AlertLevel {
    if value >= thresholds.extreme_high {
        AlertLevel::ExtremeHigh
    } else if value >= thresholds.very_high {
        AlertLevel::VeryHigh
    } else if value >= thresholds.high {
        AlertLevel::High
    } else if value < thresholds.extreme_low {
        AlertLevel::ExtremeLow
    } else if value < thresholds.low {
        AlertLevel::Low
    } else {
        AlertLevel::NoAlert
    }
}

/// Detect two different alert bands within one UTC calendar day
///
/// Fires when both the previously persisted level and the current level are
/// alerts, they differ, and both readings fall on the same day.
pub fn dual_alert(
    previous_level: AlertLevel,
    previous_time: DateTime<Utc>,
    current_level: AlertLevel,
    current_value: Decimal,
    current_time: DateTime<Utc>,
) -> Option<DualAlert> {
    let both_alerts = previous_level.is_alert() && current_level.is_alert();
    let same_day = previous_time.date_naive() == current_time.date_naive();

    if both_alerts && previous_level != current_level && same_day {
        Some(DualAlert {
            level: current_level,
            value: current_value,
        })
    } else {
        None
    }
}
