//! Trend detection types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One oscillator histogram sample with the candle it was computed on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSample {
    pub time: DateTime<Utc>,
    pub histogram: Decimal,
    /// Histogram of the preceding candle
    pub prev_histogram: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// Direction of a detected reversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossType {
    /// Histogram turned non-positive
    Bearish,
    /// Histogram turned positive
    Bullish,
}

impl fmt::Display for CrossType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossType::Bearish => write!(f, "bearish"),
            CrossType::Bullish => write!(f, "bullish"),
        }
    }
}

/// A histogram sign change between two consecutive samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cross {
    pub time: DateTime<Utc>,
    pub cross_type: CrossType,
    pub histogram: Decimal,
    pub prev_histogram: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl Cross {
    /// Build a cross from the sample where the sign changed
    pub fn from_sample(sample: &HistogramSample, cross_type: CrossType) -> Self {
        Self {
            time: sample.time,
            cross_type,
            histogram: sample.histogram,
            prev_histogram: sample.prev_histogram,
            high: sample.high,
            low: sample.low,
            close: sample.close,
        }
    }
}
