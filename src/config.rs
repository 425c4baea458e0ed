//! Configuration types for market-alert

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::feed::SeriesParams;
use crate::volatility::ThresholdConfig;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub exchange: ExchangeConfig,
    pub notifier: NotifierConfig,
    pub volatility: VolatilityConfig,
    pub trend: TrendConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

/// Configuration errors, all fatal at startup
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("alert thresholds must satisfy extreme_low < low < high < very_high < extreme_high, got {0}")]
    ThresholdOrder(String),
    #[error("PPO periods must be positive with fast < slow, got fast={fast} slow={slow} signal={signal}")]
    PpoPeriods { fast: usize, slow: usize, signal: usize },
    #[error("trend data_period must be positive")]
    EmptyDataPeriod,
    #[error("market hours open ({open}) must be before close ({close})")]
    MarketHours { open: NaiveTime, close: NaiveTime },
    #[error("poll interval for {0} must be positive")]
    PollInterval(&'static str),
}

/// Market data API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    pub api_key: String,
    /// Serve candles from the on-disk cache when present
    #[serde(default)]
    pub use_cache: bool,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.twelvedata.com".to_string()
}
fn default_cache_dir() -> PathBuf {
    PathBuf::from("./cache")
}
fn default_timeout_secs() -> u64 {
    10
}

/// Where alert messages go
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    pub mode: NotifierMode,
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default = "default_telegram_url")]
    pub api_url: String,
}

fn default_telegram_url() -> String {
    "https://api.telegram.org".to_string()
}

/// Notifier mode: real delivery or log-only dry run
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotifierMode {
    Telegram,
    Log,
}

/// Volatility index pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VolatilityConfig {
    pub params: SeriesParams,
    #[serde(default = "default_volatility_name")]
    pub display_name: String,
    #[serde(default = "default_volatility_chart")]
    pub chart_url: String,
    pub interval_secs: u64,
    pub alerts: ThresholdConfig,
    #[serde(default)]
    pub market_hours: MarketHours,
}

fn default_volatility_name() -> String {
    "CBOE Volatility Index (^VIX)".to_string()
}
fn default_volatility_chart() -> String {
    "https://www.tradingview.com/chart?symbol=TVC%3AVIX".to_string()
}

/// Regular trading session in UTC, Monday to Friday
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl Default for MarketHours {
    fn default() -> Self {
        Self {
            // 09:30-16:00 New York during daylight saving time
            open: NaiveTime::from_hms_opt(13, 30, 0).unwrap_or_default(),
            close: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
        }
    }
}

/// Equity index trend pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrendConfig {
    pub params: SeriesParams,
    #[serde(default = "default_trend_name")]
    pub display_name: String,
    #[serde(default = "default_trend_chart")]
    pub chart_url: String,
    pub interval_secs: u64,
    /// Candles consumed before histogram samples are trusted
    pub warmup_period: usize,
    /// Number of most recent samples inspected for crosses
    pub data_period: usize,
    #[serde(default)]
    pub ppo: PpoConfig,
}

fn default_trend_name() -> String {
    "S&P 500 index (^SPX)".to_string()
}
fn default_trend_chart() -> String {
    "https://www.tradingview.com/chart?symbol=SP%3ASPX".to_string()
}

/// Percentage price oscillator periods
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct PpoConfig {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for PpoConfig {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// Persisted watermark location
#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    pub dir: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./state"),
        }
    }
}

/// Health and metrics HTTP server
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3008,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormatConfig,
}

/// Log output format as written in the config file
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatConfig {
    #[default]
    Pretty,
    Json,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load a TOML file, or the bundled example when the file does not exist
    ///
    /// The flag is `true` when the example was used. Unreadable files and
    /// parse errors are returned, never papered over.
    pub fn load_or_example(path: impl AsRef<std::path::Path>) -> anyhow::Result<(Self, bool)> {
        let (content, from_example) = match std::fs::read_to_string(path) {
            Ok(content) => (content, false),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (EXAMPLE_CONFIG.to_string(), true),
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&content)?;
        Ok((config, from_example))
    }

    /// Reject configurations the pipelines cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.volatility.alerts.validate()?;

        let ppo = self.trend.ppo;
        if ppo.fast == 0 || ppo.signal == 0 || ppo.fast >= ppo.slow {
            return Err(ConfigError::PpoPeriods {
                fast: ppo.fast,
                slow: ppo.slow,
                signal: ppo.signal,
            });
        }
        if self.trend.data_period == 0 {
            return Err(ConfigError::EmptyDataPeriod);
        }

        let hours = self.volatility.market_hours;
        if hours.open >= hours.close {
            return Err(ConfigError::MarketHours {
                open: hours.open,
                close: hours.close,
            });
        }

        if self.volatility.interval_secs == 0 {
            return Err(ConfigError::PollInterval("volatility"));
        }
        if self.trend.interval_secs == 0 {
            return Err(ConfigError::PollInterval("trend"));
        }
        Ok(())
    }
}

impl ThresholdConfig {
    /// Check the strict ordering of the five bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = [
            self.extreme_low,
            self.low,
            self.high,
            self.very_high,
            self.extreme_high,
        ];
        if bounds.windows(2).all(|pair| pair[0] < pair[1]) {
            Ok(())
        } else {
            Err(ConfigError::ThresholdOrder(format!("{:?}", bounds)))
        }
    }
}

/// Example configuration bundled into the binary
pub const EXAMPLE_CONFIG: &str = include_str!("../config.toml.example");
