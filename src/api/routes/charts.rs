//! Chart Routes
//!
//! Series are built from the full dataset on every request.
//!
//! - GET /api/v1/charts/all - All customers on a shared date axis
//! - GET /api/v1/charts/customers/:id - One customer's transactions

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chart::{build_all, build_single, ChartSeries};
use crate::dataset::{CustomerId, Dataset};
use crate::source::LoadState;

/// GET /api/v1/charts/all
pub async fn all_customers_chart(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ChartSeries>> {
    let dataset = loaded_dataset(&state).await?;
    let mut palette = state.palette();
    Ok(Json(build_all(&dataset, &mut palette)))
}

/// GET /api/v1/charts/customers/:id
///
/// 404 when the id is not in the full dataset.
pub async fn customer_chart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ChartSeries>> {
    let dataset = loaded_dataset(&state).await?;
    let series = build_single(&dataset, &CustomerId::new(id))?;
    Ok(Json(series))
}

/// Full dataset, or 503 while the startup load is still running
///
/// A failed load yields the empty dataset.
async fn loaded_dataset(state: &AppState) -> ApiResult<Arc<Dataset>> {
    match state.dataset.snapshot().await {
        LoadState::Pending => Err(ApiError::ServiceUnavailable(
            "dataset is still loading".to_string(),
        )),
        load => Ok(load.dataset()),
    }
}
