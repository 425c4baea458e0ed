//! Tick command implementation

use super::Services;
use crate::config::Config;
use crate::pipeline::Pipeline;
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PipelineKind {
    Volatility,
    Trend,
}

#[derive(Args, Debug)]
pub struct TickArgs {
    /// Pipeline to run
    #[arg(value_enum)]
    pub pipeline: PipelineKind,
}

impl TickArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let services = Services::from_config(config)?;
        let pipeline: &dyn Pipeline = match self.pipeline {
            PipelineKind::Volatility => services.volatility.as_ref(),
            PipelineKind::Trend => services.trend.as_ref(),
        };

        let report = pipeline.try_cycle().await?;
        println!("{} cycle complete", report.pipeline);
        println!("  Notified: {}", report.notified());
        println!("  Delivery failures: {}", report.delivery_failures);
        println!("  State saved: {}", report.state_saved);
        Ok(())
    }
}
