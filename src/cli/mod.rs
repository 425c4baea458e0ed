//! CLI interface for market-alert
//!
//! Provides subcommands for:
//! - `run`: Start both pipelines on their schedules plus the health server
//! - `tick`: Run a single cycle of one pipeline
//! - `state`: Show persisted watermarks
//! - `config`: Show effective configuration

mod run;
mod services;
mod tick;

pub use run::RunArgs;
pub use services::Services;
pub use tick::{PipelineKind, TickArgs};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "market-alert")]
#[command(about = "Volatility and trend alert bot for stock market indices")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start scheduled alerting
    Run(RunArgs),
    /// Run one cycle of a pipeline now
    Tick(TickArgs),
    /// Show persisted watermarks
    State,
    /// Show configuration
    Config,
}
