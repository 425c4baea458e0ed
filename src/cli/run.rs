//! Run command implementation

use super::Services;
use crate::config::Config;
use crate::pipeline::{self, Pipeline};
use crate::server;
use clap::Args;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Do not start the health/metrics HTTP server
    #[arg(long)]
    pub no_server: bool,

    /// Skip the start-up notice to the chat
    #[arg(short, long)]
    pub quiet_start: bool,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config, metrics: Option<PrometheusHandle>) -> anyhow::Result<()> {
        let services = Services::from_config(config)?;

        if !self.quiet_start {
            pipeline::announce_start(services.notifier.as_ref(), &services.health).await;
        }

        let mut tasks = vec![
            tokio::spawn(schedule(
                services.volatility.clone(),
                Duration::from_secs(config.volatility.interval_secs),
            )),
            tokio::spawn(schedule(
                services.trend.clone(),
                Duration::from_secs(config.trend.interval_secs),
            )),
        ];

        if !self.no_server {
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let router = server::router(services.health.clone(), metrics);
            tasks.push(tokio::spawn(async move {
                if let Err(e) = server::serve(&addr, router).await {
                    tracing::error!(error = %e, "HTTP server stopped");
                }
            }));
        }

        tokio::signal::ctrl_c().await?;
        tracing::info!("Shutting down");
        for task in tasks {
            task.abort();
        }
        Ok(())
    }
}

/// Invoke a pipeline every `period`; a slow cycle delays the next tick instead of overlapping it
async fn schedule<P: Pipeline + 'static>(pipeline: Arc<P>, period: Duration) {
    tracing::info!(pipeline = pipeline.name(), period_secs = period.as_secs(), "Pipeline scheduled");
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if let Some(report) = pipeline.run_cycle().await {
            tracing::debug!(pipeline = report.pipeline, notified = report.notified(), "Cycle finished");
        }
    }
}
