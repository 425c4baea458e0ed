//! Pipeline orchestration
//!
//! Composes classification, cross detection and gating into full cycles.
//! The `evaluate_*` functions are pure; the pipeline structs wrap them with
//! retrieval, state persistence and delivery.

mod message;
mod trend;
mod volatility;

pub use message::{
    cross_message, dual_alert_message, fixed, level_description, volatility_message, SeriesLabel,
};
pub use trend::{evaluate_trend, TrendDecision, TrendNotification, TrendPipeline};
pub use volatility::{evaluate_volatility, VolatilityDecision, VolatilityPipeline};

use crate::feed::FeedError;
use crate::indicator::IndicatorError;
use crate::notify::{HealthStatus, Notifier};
use crate::state::{load_record, save_record, StateStore};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Failures that abort a cycle before any state is touched
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Candle retrieval failed
    #[error("failed to fetch {symbol}: {source}")]
    Upstream {
        symbol: String,
        #[source]
        source: FeedError,
    },
    /// Retrieval succeeded but returned nothing usable
    #[error("no candles returned for {0}")]
    EmptySeries(String),
    /// Histogram computation failed
    #[error("indicator computation failed for {symbol}: {source}")]
    Indicator {
        symbol: String,
        #[source]
        source: IndicatorError,
    },
}

/// What a completed cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub pipeline: &'static str,
    /// Messages handed to the notifier successfully
    pub delivered: usize,
    /// Messages the notifier failed to deliver
    pub delivery_failures: usize,
    /// Every state write of the cycle succeeded
    pub state_saved: bool,
}

impl CycleReport {
    pub fn new(pipeline: &'static str) -> Self {
        Self {
            pipeline,
            delivered: 0,
            delivery_failures: 0,
            state_saved: true,
        }
    }

    pub fn record_delivery(&mut self, delivered: bool) {
        if delivered {
            self.delivered += 1;
        } else {
            self.delivery_failures += 1;
        }
    }

    /// Number of notifications the gate let through
    pub fn notified(&self) -> usize {
        self.delivered + self.delivery_failures
    }
}

/// A periodically invoked alert pipeline
#[async_trait]
pub trait Pipeline: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run one cycle, surfacing aborting errors
    async fn try_cycle(&self) -> Result<CycleReport, PipelineError>;

    /// Run one cycle; errors are logged here and never propagate
    async fn run_cycle(&self) -> Option<CycleReport> {
        match self.try_cycle().await {
            Ok(report) => {
                metrics::counter!("market_alert_cycles_total", "pipeline" => self.name(), "outcome" => "completed")
                    .increment(1);
                Some(report)
            }
            Err(e) => {
                metrics::counter!("market_alert_cycles_total", "pipeline" => self.name(), "outcome" => "aborted")
                    .increment(1);
                tracing::error!(pipeline = self.name(), error = %e, "Cycle aborted, state untouched");
                None
            }
        }
    }
}

/// Load a watermark, treating unreadable or corrupt state as absent
pub(crate) fn load_watermark<T: DeserializeOwned>(
    store: &dyn StateStore,
    key: &str,
    pipeline: &'static str,
) -> Option<T> {
    match load_record(store, key) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(pipeline, error = %e, "Unreadable state, treating as first run");
            None
        }
    }
}

/// Persist a watermark; failure is logged and reported as `false`
pub(crate) fn persist<T: Serialize>(
    store: &dyn StateStore,
    key: &str,
    record: &T,
    pipeline: &'static str,
) -> bool {
    match save_record(store, key, record) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(pipeline, error = %e, "Failed to persist state, next cycle may re-notify");
            false
        }
    }
}

/// Send one message; failures degrade health and are not retried
pub(crate) async fn deliver(
    notifier: &dyn Notifier,
    health: &HealthStatus,
    pipeline: &'static str,
    message: &str,
) -> bool {
    tracing::info!(pipeline, message = %message, "Sending notification");
    match notifier.send(message).await {
        Ok(()) => {
            metrics::counter!("market_alert_notifications_total", "pipeline" => pipeline).increment(1);
            true
        }
        Err(e) => {
            metrics::counter!("market_alert_delivery_failures_total", "pipeline" => pipeline).increment(1);
            tracing::error!(pipeline, error = %e, "Could not deliver notification");
            health.mark_degraded();
            false
        }
    }
}

/// Tell the chat the bot (re)started
pub async fn announce_start(notifier: &dyn Notifier, health: &HealthStatus) {
    deliver(notifier, health, "startup", "(Re)starting-up Bot... 🤓").await;
}
