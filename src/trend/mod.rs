//! Trend reversal detection
//!
//! Finds sign changes in an oscillator histogram between consecutive samples

mod detector;
mod types;

pub use detector::{detect_crosses, is_bullish_side};
pub use types::{Cross, CrossType, HistogramSample};
