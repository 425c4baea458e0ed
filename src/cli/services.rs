//! Wiring of collaborators from configuration

use crate::config::{Config, NotifierMode};
use crate::feed::{CandleSource, TwelveDataClient};
use crate::notify::{HealthStatus, LogNotifier, Notifier, TelegramNotifier};
use crate::pipeline::{TrendPipeline, VolatilityPipeline};
use crate::state::{JsonFileStore, StateStore};
use std::sync::Arc;

/// Everything a command needs to run cycles
pub struct Services {
    pub health: HealthStatus,
    pub notifier: Arc<dyn Notifier>,
    pub volatility: Arc<VolatilityPipeline>,
    pub trend: Arc<TrendPipeline>,
}

impl Services {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let health = HealthStatus::new();
        let source: Arc<dyn CandleSource> = Arc::new(TwelveDataClient::new(&config.exchange)?);
        let store: Arc<dyn StateStore> = Arc::new(JsonFileStore::new(&config.state.dir));
        let notifier: Arc<dyn Notifier> = match config.notifier.mode {
            NotifierMode::Telegram => Arc::new(TelegramNotifier::new(&config.notifier)?),
            NotifierMode::Log => Arc::new(LogNotifier),
        };

        if config.exchange.use_cache {
            tracing::warn!(dir = %config.exchange.cache_dir.display(), "Cached market data will be used when available");
        }

        let volatility = Arc::new(VolatilityPipeline::new(
            &config.volatility,
            source.clone(),
            store.clone(),
            notifier.clone(),
            health.clone(),
        ));
        let trend = Arc::new(TrendPipeline::new(
            &config.trend,
            source,
            store,
            notifier.clone(),
            health.clone(),
        ));

        Ok(Self {
            health,
            notifier,
            volatility,
            trend,
        })
    }
}
