//! Health and metrics HTTP endpoints

use crate::notify::HealthStatus;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

#[derive(Clone)]
struct AppState {
    health: HealthStatus,
    metrics: Option<PrometheusHandle>,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    health_ok: bool,
}

/// Build the router; `/metrics` is only served when a recorder handle is given
pub fn router(health: HealthStatus, metrics: Option<PrometheusHandle>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .with_state(AppState { health, metrics })
}

/// Serve the router until the process shuts down
pub async fn serve(addr: &str, router: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "HTTP server listening");
    axum::serve(listener, router).await?;
    Ok(())
}

async fn root() -> &'static str {
    concat!("market-alert v", env!("CARGO_PKG_VERSION"))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = state.health.is_healthy();
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(HealthBody { health_ok: healthy }))
}

async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}
