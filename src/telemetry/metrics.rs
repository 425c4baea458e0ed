//! Prometheus metrics

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder and describe the exported series
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {}", e))?;

    metrics::describe_counter!(
        "market_alert_cycles_total",
        "Pipeline cycles by outcome (completed/aborted)"
    );
    metrics::describe_counter!(
        "market_alert_notifications_total",
        "Notifications delivered"
    );
    metrics::describe_counter!(
        "market_alert_delivery_failures_total",
        "Notifications the messaging API did not accept"
    );
    metrics::describe_gauge!(
        "market_alert_volatility_value",
        "Latest volatility index reading"
    );

    Ok(handle)
}
