//! Market data types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which series to request from the data provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesParams {
    /// Ticker symbol (e.g., "VIX")
    pub symbol: String,
    /// Candle interval (e.g., "1day", "1week")
    pub interval: String,
    /// Number of candles to request
    pub outputsize: u32,
}

/// A single OHLC candle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Candle open time
    pub time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// Retrieval failures; any of these aborts the cycle
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Provider answered without a candle series
    #[error("missing values in response (status {status}): {body}")]
    MissingValues { status: u16, body: String },
    /// A candle field could not be parsed
    #[error("malformed candle data: {0}")]
    Malformed(String),
    /// The series contained no candles
    #[error("empty series returned for {0}")]
    Empty(String),
    /// Reading or writing the response cache failed
    #[error("cache I/O failed: {0}")]
    Cache(#[from] std::io::Error),
    /// Cached response could not be decoded
    #[error("cache decode failed: {0}")]
    CacheDecode(#[from] serde_json::Error),
}
