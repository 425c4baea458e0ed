//! Twelve Data API client for index time series
//!
//! Requests `/time_series` in ascending order and converts the string-encoded
//! OHLC values into candles. Responses can be cached on disk per
//! symbol/interval so repeated runs do not burn API credits.

use super::{Candle, CandleSource, FeedError, SeriesParams};
use crate::config::ExchangeConfig;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Raw candle as returned by the API (all fields are strings)
#[derive(Debug, Deserialize)]
struct RawCandle {
    datetime: String,
    open: String,
    high: String,
    low: String,
    close: String,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    values: Option<Vec<RawCandle>>,
}

/// Client for the Twelve Data REST API
pub struct TwelveDataClient {
    base_url: String,
    api_key: String,
    use_cache: bool,
    cache_dir: PathBuf,
    client: Client,
}

impl TwelveDataClient {
    /// Create a new client from the exchange configuration
    pub fn new(config: &ExchangeConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            use_cache: config.use_cache,
            cache_dir: config.cache_dir.clone(),
            client,
        })
    }

    fn cache_path(&self, params: &SeriesParams) -> PathBuf {
        let name: String = format!("{}_{}", params.symbol, params.interval)
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.cache_dir.join(format!("{}.json", name))
    }

    async fn read_cache(&self, params: &SeriesParams) -> Result<Option<Vec<Candle>>, FeedError> {
        let path = self.cache_path(params);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let candles: Vec<Candle> = serde_json::from_str(&content)?;
                if candles.is_empty() {
                    return Err(FeedError::Empty(path.display().to_string()));
                }
                tracing::debug!(path = %path.display(), "Serving candles from cache");
                Ok(Some(candles))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_cache(&self, params: &SeriesParams, candles: &[Candle]) -> Result<(), FeedError> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        let content = serde_json::to_string_pretty(candles)?;
        tokio::fs::write(self.cache_path(params), content).await?;
        Ok(())
    }

    async fn fetch_remote(&self, params: &SeriesParams) -> Result<Vec<Candle>, FeedError> {
        let url = format!("{}/time_series", self.base_url);
        let outputsize = params.outputsize.to_string();

        tracing::debug!(url = %url, symbol = %params.symbol, interval = %params.interval, "Fetching time series");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", params.symbol.as_str()),
                ("interval", params.interval.as_str()),
                ("outputsize", outputsize.as_str()),
                ("order", "ASC"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let parsed: TimeSeriesResponse =
            serde_json::from_str(&body).map_err(|e| FeedError::Malformed(e.to_string()))?;

        let values = parsed
            .values
            .ok_or(FeedError::MissingValues { status, body })?;

        parse_candles(&params.symbol, values)
    }
}

#[async_trait]
impl CandleSource for TwelveDataClient {
    async fn fetch(&self, params: &SeriesParams) -> Result<Vec<Candle>, FeedError> {
        if self.use_cache {
            if let Some(candles) = self.read_cache(params).await? {
                return Ok(candles);
            }
        }

        let candles = self.fetch_remote(params).await?;

        if self.use_cache {
            if let Err(e) = self.write_cache(params, &candles).await {
                tracing::warn!(error = %e, symbol = %params.symbol, "Could not write candle cache");
            }
        }

        Ok(candles)
    }
}

fn parse_candles(symbol: &str, values: Vec<RawCandle>) -> Result<Vec<Candle>, FeedError> {
    if values.is_empty() {
        return Err(FeedError::Empty(symbol.to_string()));
    }
    values.into_iter().map(parse_candle).collect()
}

fn parse_candle(raw: RawCandle) -> Result<Candle, FeedError> {
    Ok(Candle {
        time: parse_datetime(&raw.datetime)?,
        open: parse_decimal("open", &raw.open)?,
        high: parse_decimal("high", &raw.high)?,
        low: parse_decimal("low", &raw.low)?,
        close: parse_decimal("close", &raw.close)?,
    })
}

/// Quotes arrive zero-padded (`"26.40000"`); trailing zeros are dropped
fn parse_decimal(field: &str, value: &str) -> Result<Decimal, FeedError> {
    Decimal::from_str(value)
        .map(|d| d.normalize())
        .map_err(|e| FeedError::Malformed(format!("{} '{}': {}", field, value, e)))
}

/// Accepts `YYYY-MM-DD` (daily and weekly series) and `YYYY-MM-DD HH:MM:SS`
fn parse_datetime(value: &str) -> Result<DateTime<Utc>, FeedError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| FeedError::Malformed(format!("datetime '{}'", value)))
}
