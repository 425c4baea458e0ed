//! Telemetry module
//!
//! Logging and metrics

mod logging;
mod metrics;

pub use self::metrics::init_metrics;
pub use logging::{init_logging, LogFormat};

use crate::config::TelemetryConfig;
use metrics_exporter_prometheus::PrometheusHandle;

/// Handles kept alive for the lifetime of the process
pub struct TelemetryGuard {
    pub metrics: PrometheusHandle,
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level, config.log_format.into())?;
    let metrics = init_metrics()?;
    Ok(TelemetryGuard { metrics })
}
