//! Trend pipeline: histogram samples -> crosses -> gate -> one notification per cross

use super::message::{cross_message, SeriesLabel};
use super::{deliver, load_watermark, persist, CycleReport, Pipeline, PipelineError};
use crate::config::TrendConfig;
use crate::feed::{CandleSource, SeriesParams};
use crate::gate::gate_crosses;
use crate::indicator::PpoHistogram;
use crate::notify::{HealthStatus, Notifier};
use crate::state::{StateStore, TrendNotificationState, TREND_KEY};
use crate::trend::{detect_crosses, Cross, HistogramSample};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A cross that passed the gate
#[derive(Debug, Clone, PartialEq)]
pub struct TrendNotification {
    pub cross: Cross,
    pub message: String,
    /// Watermark to persist once this notification is handled
    pub watermark: TrendNotificationState,
}

/// Crosses found in one batch of samples
#[derive(Debug, Clone, PartialEq)]
pub struct TrendDecision {
    /// All sign changes in the batch, notified or not
    pub crosses: usize,
    /// Chronological notifications with strictly advancing watermarks
    pub notifications: Vec<TrendNotification>,
}

/// Detect, gate and compose without touching storage or the network
pub fn evaluate_trend(
    samples: &[HistogramSample],
    previous: Option<&TrendNotificationState>,
    label: &SeriesLabel,
) -> TrendDecision {
    let crosses = detect_crosses(samples);
    let total = crosses.len();

    let notifications = gate_crosses(crosses, previous)
        .into_iter()
        .map(|(cross, watermark)| TrendNotification {
            message: cross_message(label, &cross),
            cross,
            watermark,
        })
        .collect();

    TrendDecision {
        crosses: total,
        notifications,
    }
}

/// Runs trend cycles against live collaborators
pub struct TrendPipeline {
    params: SeriesParams,
    producer: PpoHistogram,
    label: SeriesLabel,
    source: Arc<dyn CandleSource>,
    store: Arc<dyn StateStore>,
    notifier: Arc<dyn Notifier>,
    health: HealthStatus,
    cycle: Mutex<()>,
}

impl TrendPipeline {
    pub fn new(
        config: &TrendConfig,
        source: Arc<dyn CandleSource>,
        store: Arc<dyn StateStore>,
        notifier: Arc<dyn Notifier>,
        health: HealthStatus,
    ) -> Self {
        Self {
            params: config.params.clone(),
            producer: PpoHistogram::new(config.ppo, config.warmup_period, config.data_period),
            label: SeriesLabel::new(&config.params.symbol, &config.display_name, &config.chart_url),
            source,
            store,
            notifier,
            health,
            cycle: Mutex::new(()),
        }
    }
}

#[async_trait]
impl Pipeline for TrendPipeline {
    fn name(&self) -> &'static str {
        "trend"
    }

    async fn try_cycle(&self) -> Result<CycleReport, PipelineError> {
        let _guard = self.cycle.lock().await;
        let name = self.name();

        let candles = self
            .source
            .fetch(&self.params)
            .await
            .map_err(|source| PipelineError::Upstream {
                symbol: self.params.symbol.clone(),
                source,
            })?;
        let samples = self
            .producer
            .samples(&candles)
            .map_err(|source| PipelineError::Indicator {
                symbol: self.params.symbol.clone(),
                source,
            })?;

        let previous: Option<TrendNotificationState> =
            load_watermark(self.store.as_ref(), TREND_KEY, name);
        let decision = evaluate_trend(&samples, previous.as_ref(), &self.label);

        tracing::info!(
            pipeline = name,
            samples = samples.len(),
            latest = ?samples.last().map(|s| s.time),
            crosses = decision.crosses,
            notify = decision.notifications.len(),
            "Histogram scanned"
        );

        let mut report = CycleReport::new(name);
        for notification in &decision.notifications {
            tracing::info!(
                pipeline = name,
                cross = %notification.cross.cross_type,
                time = %notification.cross.time,
                histogram = %notification.cross.histogram,
                "Cross detected"
            );
            report.record_delivery(
                deliver(self.notifier.as_ref(), &self.health, name, &notification.message).await,
            );
            if !persist(self.store.as_ref(), TREND_KEY, &notification.watermark, name) {
                report.state_saved = false;
            }
        }

        if decision.notifications.is_empty() {
            tracing::debug!(pipeline = name, "No new crosses detected");
        }
        Ok(report)
    }
}
