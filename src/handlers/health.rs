//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use skillswap_realtime::metrics::MetricsSnapshot;

use crate::state::AppState;

/// GET /api/health response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process answers.
    pub status: &'static str,
    /// Server version.
    pub version: &'static str,
    /// Active connection count.
    pub connections: usize,
    /// Unique connected users.
    pub users: usize,
    /// Engine counters.
    pub metrics: MetricsSnapshot,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        connections: state.engine.connections.connection_count(),
        users: state.engine.connections.user_count(),
        metrics: state.engine.metrics.snapshot(),
    })
}
