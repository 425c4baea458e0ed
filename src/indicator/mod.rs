//! Technical indicators
//!
//! Produces the oscillator histogram series consumed by trend detection

mod ppo;

pub use ppo::{Ema, IndicatorError, PpoHistogram};
