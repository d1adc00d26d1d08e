//! Filter Engine
//!
//! Derives a filtered view from the full dataset. Every filter recomputes
//! from the full dataset; applying one replaces the previous view rather
//! than narrowing it.

use serde::Serialize;

use super::amount::canonical_amount;
use crate::dataset::{CustomerWithTransactions, Dataset};

/// Customers whose name starts with `query`, ignoring case
///
/// An empty query keeps every customer.
pub fn filter_by_name(dataset: &Dataset, query: &str) -> Vec<CustomerWithTransactions> {
    let needle = query.to_lowercase();
    dataset
        .customers()
        .iter()
        .filter(|c| c.name().to_lowercase().starts_with(&needle))
        .cloned()
        .collect()
}

/// Customers with at least one transaction whose amount text starts with
/// `query`
///
/// Amounts are compared through [`canonical_amount`]. An empty query keeps
/// every customer, including those without transactions.
pub fn filter_by_amount_prefix(dataset: &Dataset, query: &str) -> Vec<CustomerWithTransactions> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return dataset.customers().to_vec();
    }

    dataset
        .customers()
        .iter()
        .filter(|c| {
            c.transactions
                .iter()
                .any(|t| canonical_amount(t.amount).starts_with(&needle))
        })
        .cloned()
        .collect()
}

/// The active search predicate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "by", content = "query", rename_all = "snake_case")]
pub enum Filter {
    /// Identity filter
    #[default]
    All,
    /// Customer-name prefix
    Name(String),
    /// Transaction-amount prefix
    AmountPrefix(String),
}

impl Filter {
    /// Compute the filtered view from the full dataset
    pub fn apply(&self, dataset: &Dataset) -> Vec<CustomerWithTransactions> {
        match self {
            Filter::All => dataset.customers().to_vec(),
            Filter::Name(query) => filter_by_name(dataset, query),
            Filter::AmountPrefix(query) => filter_by_amount_prefix(dataset, query),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }
}
