//! Status Routes
//!
//! - GET /api/v1/status - Dataset load status and counts

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::StatusResponse;
use crate::api::state::AppState;

/// GET /api/v1/status
pub async fn load_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let load = state.dataset.snapshot().await;
    let dataset = load.dataset();

    Json(StatusResponse {
        status: load.status(),
        customers: dataset.len(),
        transactions: dataset.transaction_count(),
        orphaned_transactions: dataset.orphaned_transactions(),
        error: load.error().map(str::to_string),
    })
}
