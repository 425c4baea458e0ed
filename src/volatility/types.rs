//! Volatility classification types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discrete alert level of the volatility index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    /// Inside the normal band
    NoAlert,
    ExtremeLow,
    Low,
    High,
    VeryHigh,
    ExtremeHigh,
}

impl AlertLevel {
    /// Whether this level is outside the normal band
    pub fn is_alert(&self) -> bool {
        *self != AlertLevel::NoAlert
    }
}

/// Alert thresholds in index points (percent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub extreme_low: Decimal,
    pub low: Decimal,
    pub high: Decimal,
    pub very_high: Decimal,
    pub extreme_high: Decimal,
}

/// One volatility reading per poll cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Current index value
    pub value: Decimal,
    /// Close of the last completed candle
    pub latest_close: Decimal,
    /// Time of the candle the value was read from
    pub timestamp: DateTime<Utc>,
    /// Reading was taken outside regular trading hours
    pub is_market_closed: bool,
}

/// Two distinct alert bands reached within the same day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualAlert {
    /// The level reached by the current reading
    pub level: AlertLevel,
    /// The current reading
    pub value: Decimal,
}
