//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use opsdesk_db::DocumentStore;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the document store is reachable.
    pub store_healthy: bool,
}

/// GET /health -- returns service and store health.
///
/// The store seam has no dedicated ping, so a cheap read doubles as the probe.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = state.store.list("health_probe").await.is_ok();

    let status = if store_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_healthy,
    })
}
