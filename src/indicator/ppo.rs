//! Percentage price oscillator histogram

use crate::config::PpoConfig;
use crate::feed::Candle;
use crate::trend::HistogramSample;
use rust_decimal::Decimal;
use thiserror::Error;

/// Indicator computation failures
#[derive(Debug, Error, PartialEq)]
pub enum IndicatorError {
    #[error("not enough candles: need more than {needed}, got {got}")]
    NotEnoughData { needed: usize, got: usize },
    #[error("slow moving average reached zero at {0}")]
    ZeroAverage(chrono::DateTime<chrono::Utc>),
}

/// Exponential moving average seeded with its first input
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: Decimal,
    value: Option<Decimal>,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            alpha: Decimal::TWO / Decimal::from(period + 1),
            value: None,
        }
    }

    /// Feed the next input and return the updated average
    pub fn update(&mut self, input: Decimal) -> Decimal {
        let next = match self.value {
            Some(prev) => prev + self.alpha * (input - prev),
            None => input,
        };
        self.value = Some(next);
        next
    }
}

/// PPO histogram producer: `ppo - ema(ppo, signal)`
#[derive(Debug, Clone)]
pub struct PpoHistogram {
    config: PpoConfig,
    warmup_period: usize,
    data_period: usize,
}

impl PpoHistogram {
    pub fn new(config: PpoConfig, warmup_period: usize, data_period: usize) -> Self {
        Self {
            config,
            warmup_period,
            data_period,
        }
    }

    /// Histogram values for every candle close
    pub fn histogram(&self, candles: &[Candle]) -> Result<Vec<Decimal>, IndicatorError> {
        let mut fast = Ema::new(self.config.fast);
        let mut slow = Ema::new(self.config.slow);
        let mut signal = Ema::new(self.config.signal);

        candles
            .iter()
            .map(|candle| {
                let fast_value = fast.update(candle.close);
                let slow_value = slow.update(candle.close);
                if slow_value.is_zero() {
                    return Err(IndicatorError::ZeroAverage(candle.time));
                }
                let ppo = (fast_value - slow_value) / slow_value * Decimal::ONE_HUNDRED;
                Ok(ppo - signal.update(ppo))
            })
            .collect()
    }

    /// Samples after the warmup period, limited to the most recent `data_period`
    pub fn samples(&self, candles: &[Candle]) -> Result<Vec<HistogramSample>, IndicatorError> {
        let first = self.warmup_period.max(1);
        if candles.len() <= first {
            return Err(IndicatorError::NotEnoughData {
                needed: first,
                got: candles.len(),
            });
        }

        let histogram = self.histogram(candles)?;
        let start = first.max(candles.len().saturating_sub(self.data_period));

        Ok((start..candles.len())
            .map(|i| HistogramSample {
                time: candles[i].time,
                histogram: histogram[i],
                prev_histogram: histogram[i - 1],
                high: candles[i].high,
                low: candles[i].low,
                close: candles[i].close,
            })
            .collect())
    }
}
