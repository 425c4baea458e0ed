//! market-alert: volatility and trend alerts for stock market indices
//!
//! This library provides the core components for:
//! - Candle retrieval from the Twelve Data API
//! - Alert level classification of a volatility index
//! - PPO histogram crosses on an equity index
//! - Deduplication against persisted watermarks
//! - Telegram delivery with a shared health flag
//! - Health and metrics HTTP endpoints

pub mod cli;
pub mod config;
pub mod feed;
pub mod gate;
pub mod indicator;
pub mod notify;
pub mod pipeline;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod trend;
pub mod volatility;
