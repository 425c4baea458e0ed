//! Histogram cross detection

use super::{Cross, CrossType, HistogramSample};
use rust_decimal::Decimal;

/// Zero counts as the bearish side of the histogram
pub fn is_bullish_side(histogram: Decimal) -> bool {
    histogram > Decimal::ZERO
}

/// Scan samples for sign changes, preserving chronological order
///
/// Stateless and single-pass: the same input always yields the same crosses.
pub fn detect_crosses(samples: &[HistogramSample]) -> Vec<Cross> {
    samples
        .iter()
        .filter_map(|sample| {
            let now_bullish = is_bullish_side(sample.histogram);
            if now_bullish == is_bullish_side(sample.prev_histogram) {
                return None;
            }
            let cross_type = if now_bullish {
                CrossType::Bullish
            } else {
                CrossType::Bearish
            };
            Some(Cross::from_sample(sample, cross_type))
        })
        .collect()
}
