//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (dataset loaded)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::source::LoadStatus;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 once the startup load has produced a dataset.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.dataset.snapshot().await.status() {
        LoadStatus::Ready => StatusCode::OK,
        LoadStatus::Pending | LoadStatus::Failed => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = state.dataset.snapshot().await.status();

    let overall_status = match dataset {
        LoadStatus::Ready => "healthy",
        LoadStatus::Pending => "starting",
        // Still serving, with an empty table
        LoadStatus::Failed => "degraded",
    };

    Json(HealthResponse {
        status: overall_status.to_string(),
        dataset,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
