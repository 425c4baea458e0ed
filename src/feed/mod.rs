//! Market data retrieval
//!
//! Fetches OHLC candles for the watched indices from the Twelve Data API

mod twelve_data;
mod types;

pub use twelve_data::TwelveDataClient;
pub use types::{Candle, FeedError, SeriesParams};

use async_trait::async_trait;

/// Trait for candle retrieval implementations
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetch an ascending series of candles
    async fn fetch(&self, params: &SeriesParams) -> Result<Vec<Candle>, FeedError>;
}
