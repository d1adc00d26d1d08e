//! Data Transfer Objects
//!
//! Request and response types for the endpoints.

use serde::{Deserialize, Serialize};

use crate::dataset::{CustomerId, CustomerWithTransactions};
use crate::filter::Filter;
use crate::source::LoadStatus;
use crate::view::Action;

// ============================================
// PAGE DTOs
// ============================================

/// Query string of the viewer page
///
/// `by` names the search box that was typed in last; only that box's text
/// is applied. `chart` is a customer id or `all`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub chart: Option<String>,
}

impl PageQuery {
    /// Actions to replay on a fresh view state, in order
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();

        match self.by.as_deref() {
            Some("name") => {
                actions.push(Action::FilterByName(self.name.clone().unwrap_or_default()))
            }
            Some("amount") => {
                actions.push(Action::FilterByAmount(self.amount.clone().unwrap_or_default()))
            }
            _ => {}
        }

        match self.chart.as_deref().map(str::trim) {
            None | Some("") => {}
            Some("all") => actions.push(Action::OpenAllChart),
            Some(id) => actions.push(Action::OpenChart(CustomerId::new(id))),
        }

        actions
    }
}

// ============================================
// CUSTOMER DTOs
// ============================================

/// Customer search parameters; at most one may be given
#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

/// Filtered view response
#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    /// Load status of the dataset the view was derived from
    pub status: LoadStatus,
    /// Filter that produced the view
    pub filter: Filter,
    /// Matching customers with their transactions
    pub customers: Vec<CustomerWithTransactions>,
    /// Number of matching customers
    pub total: usize,
}

// ============================================
// STATUS DTOs
// ============================================

/// Dataset load status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: LoadStatus,
    pub customers: usize,
    pub transactions: usize,
    /// Transactions that matched no customer
    pub orphaned_transactions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, starting, degraded
    pub status: String,
    /// Dataset load status
    pub dataset: LoadStatus,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
