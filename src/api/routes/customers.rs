//! Customer Routes
//!
//! - GET /api/v1/customers - Filtered view (`?name=` or `?amount=`)

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CustomerListResponse, CustomerQuery};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::filter::Filter;

/// GET /api/v1/customers
///
/// Name and amount filters are alternatives, not a conjunction: giving
/// both is rejected.
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CustomerQuery>,
) -> ApiResult<Json<CustomerListResponse>> {
    let filter = match (query.name, query.amount) {
        (Some(_), Some(_)) => {
            return Err(ApiError::Validation(
                "filter by either name or amount, not both".to_string(),
            ))
        }
        (Some(name), None) => Filter::Name(name),
        (None, Some(amount)) => Filter::AmountPrefix(amount),
        (None, None) => Filter::All,
    };

    let load = state.dataset.snapshot().await;
    let customers = filter.apply(&load.dataset());

    Ok(Json(CustomerListResponse {
        status: load.status(),
        filter,
        total: customers.len(),
        customers,
    }))
}
