//! Volatility pipeline: latest reading -> level -> gate -> notification

use super::message::{dual_alert_message, volatility_message, SeriesLabel};
use super::{deliver, load_watermark, persist, CycleReport, Pipeline, PipelineError};
use crate::config::{MarketHours, VolatilityConfig};
use crate::feed::{CandleSource, SeriesParams};
use crate::gate::{next_volatility_state, should_notify_level};
use crate::notify::{HealthStatus, Notifier};
use crate::state::{StateStore, VolatilityNotificationState, VOLATILITY_KEY};
use crate::volatility::{classify, dual_alert, observe, AlertLevel, DualAlert, Observation, ThresholdConfig};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of classifying one reading against the stored watermark
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityDecision {
    pub level: AlertLevel,
    pub should_notify: bool,
    /// Messages to send, empty when the gate is closed
    pub messages: Vec<String>,
    pub dual_alert: Option<DualAlert>,
    /// Watermark to persist whether or not anything is sent
    pub next_state: VolatilityNotificationState,
}

/// Classify, gate and compose without touching storage or the network
pub fn evaluate_volatility(
    observation: &Observation,
    thresholds: &ThresholdConfig,
    previous: Option<&VolatilityNotificationState>,
    label: &SeriesLabel,
) -> VolatilityDecision {
    let level = classify(observation.value, thresholds);
    let should_notify = should_notify_level(level, observation.timestamp, previous);

    let dual = previous.and_then(|prev| {
        dual_alert(
            prev.level,
            prev.time,
            level,
            observation.value,
            observation.timestamp,
        )
    });

    let mut messages = Vec::new();
    if should_notify {
        messages.push(volatility_message(label, level, observation, thresholds));
        if let Some(dual) = &dual {
            messages.push(dual_alert_message(label, dual, thresholds));
        }
    }

    VolatilityDecision {
        level,
        should_notify,
        messages,
        dual_alert: dual,
        next_state: next_volatility_state(level, observation.timestamp, previous),
    }
}

/// Runs volatility cycles against live collaborators
pub struct VolatilityPipeline {
    params: SeriesParams,
    thresholds: ThresholdConfig,
    market_hours: MarketHours,
    label: SeriesLabel,
    source: Arc<dyn CandleSource>,
    store: Arc<dyn StateStore>,
    notifier: Arc<dyn Notifier>,
    health: HealthStatus,
    cycle: Mutex<()>,
}

impl VolatilityPipeline {
    pub fn new(
        config: &VolatilityConfig,
        source: Arc<dyn CandleSource>,
        store: Arc<dyn StateStore>,
        notifier: Arc<dyn Notifier>,
        health: HealthStatus,
    ) -> Self {
        Self {
            params: config.params.clone(),
            thresholds: config.alerts,
            market_hours: config.market_hours,
            label: SeriesLabel::new(&config.params.symbol, &config.display_name, &config.chart_url),
            source,
            store,
            notifier,
            health,
            cycle: Mutex::new(()),
        }
    }

    /// Run one cycle with an explicit wall clock (decides market open/closed)
    pub async fn run_cycle_at(&self, now: DateTime<Utc>) -> Result<CycleReport, PipelineError> {
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
        let observation = observe(&candles, now, &self.market_hours)
            .ok_or_else(|| PipelineError::EmptySeries(self.params.symbol.clone()))?;

        metrics::gauge!("market_alert_volatility_value")
            .set(observation.value.to_f64().unwrap_or(f64::NAN));

        let previous: Option<VolatilityNotificationState> =
            load_watermark(self.store.as_ref(), VOLATILITY_KEY, name);
        let decision = evaluate_volatility(&observation, &self.thresholds, previous.as_ref(), &self.label);

        tracing::info!(
            pipeline = name,
            value = %observation.value,
            timestamp = %observation.timestamp,
            level = ?decision.level,
            notify = decision.should_notify,
            "Volatility classified"
        );

        let mut report = CycleReport::new(name);
        if decision.should_notify {
            for message in &decision.messages {
                report.record_delivery(deliver(self.notifier.as_ref(), &self.health, name, message).await);
            }
        } else {
            tracing::debug!(pipeline = name, "No new volatility change detected");
        }

        report.state_saved = persist(self.store.as_ref(), VOLATILITY_KEY, &decision.next_state, name);
        Ok(report)
    }
}

#[async_trait]
impl Pipeline for VolatilityPipeline {
    fn name(&self) -> &'static str {
        "volatility"
    }

    async fn try_cycle(&self) -> Result<CycleReport, PipelineError> {
        self.run_cycle_at(Utc::now()).await
    }
}
