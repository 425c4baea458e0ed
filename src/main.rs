use clap::Parser;
use market_alert::cli::{Cli, Commands};
use market_alert::config::Config;
use market_alert::state::{
    load_record, JsonFileStore, TrendNotificationState, VolatilityNotificationState, TREND_KEY,
    VOLATILITY_KEY,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Only a missing file falls back; parse and validation errors are fatal
    let (config, from_example) = Config::load_or_example(&cli.config)?;
    if from_example {
        eprintln!("Warning: {} not found", cli.config);
        eprintln!("Using example configuration (log-only notifier)");
    }
    config.validate()?;

    match cli.command {
        Commands::Run(args) => {
            let telemetry = market_alert::telemetry::init_telemetry(&config.telemetry)?;
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting market alert bot");
            args.execute(&config, Some(telemetry.metrics)).await?;
        }
        Commands::Tick(args) => {
            market_alert::telemetry::init_logging(
                &config.telemetry.log_level,
                config.telemetry.log_format.into(),
            )?;
            args.execute(&config).await?;
        }
        Commands::State => {
            let store = JsonFileStore::new(&config.state.dir);
            println!("Persisted state ({})", store.dir().display());

            match load_record::<VolatilityNotificationState>(&store, VOLATILITY_KEY) {
                Ok(Some(state)) => println!("  Volatility: {:?} at {}", state.level, state.time),
                Ok(None) => println!("  Volatility: none"),
                Err(e) => println!("  Volatility: unreadable ({})", e),
            }
            match load_record::<TrendNotificationState>(&store, TREND_KEY) {
                Ok(Some(state)) => println!("  Trend: last cross {}", state.last_notified_time),
                Ok(None) => println!("  Trend: none"),
                Err(e) => println!("  Trend: unreadable ({})", e),
            }
        }
        Commands::Config => {
            let alerts = &config.volatility.alerts;
            println!("Current configuration:");
            println!("  Notifier: {:?}", config.notifier.mode);
            println!(
                "  Volatility: {} {} every {}s",
                config.volatility.params.symbol,
                config.volatility.params.interval,
                config.volatility.interval_secs
            );
            println!(
                "  Thresholds: extreme_low={} low={} high={} very_high={} extreme_high={}",
                alerts.extreme_low, alerts.low, alerts.high, alerts.very_high, alerts.extreme_high
            );
            println!(
                "  Trend: {} {} every {}s, PPO {}/{}/{}",
                config.trend.params.symbol,
                config.trend.params.interval,
                config.trend.interval_secs,
                config.trend.ppo.fast,
                config.trend.ppo.slow,
                config.trend.ppo.signal
            );
            println!("  State dir: {}", config.state.dir.display());
        }
    }

    Ok(())
}
