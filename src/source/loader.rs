//! Dataset Loader
//!
//! Fetches both collections concurrently and joins them. A load is attempted
//! once; the outcome is recorded in a [`SharedDataset`] that request handlers
//! read from.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::client::DataSource;
use super::error::LoadError;
use crate::dataset::{join, Dataset};

/// Fetch customers and transactions in parallel and join them
///
/// Fails as soon as either request fails; there is no partial result.
pub async fn load<S: DataSource + ?Sized>(source: &S) -> Result<Dataset, LoadError> {
    let started = Instant::now();

    let (customers, transactions) =
        tokio::try_join!(source.fetch_customers(), source.fetch_transactions())?;

    let dataset = join(customers, transactions);

    if dataset.orphaned_transactions() > 0 {
        tracing::debug!(
            orphaned = dataset.orphaned_transactions(),
            "Dropped transactions with no matching customer"
        );
    }

    tracing::info!(
        customers = dataset.len(),
        transactions = dataset.transaction_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Dataset loaded"
    );

    Ok(dataset)
}

/// Outcome of the startup load
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    /// Requests still in flight
    #[default]
    Pending,
    /// Joined dataset available
    Ready(Arc<Dataset>),
    /// Load failed; the viewer runs with no data
    Failed(String),
}

/// Load status as reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Pending,
    Ready,
    Failed,
}

impl LoadState {
    pub fn status(&self) -> LoadStatus {
        match self {
            LoadState::Pending => LoadStatus::Pending,
            LoadState::Ready(_) => LoadStatus::Ready,
            LoadState::Failed(_) => LoadStatus::Failed,
        }
    }

    /// The full dataset, or an empty one when not loaded
    pub fn dataset(&self) -> Arc<Dataset> {
        match self {
            LoadState::Ready(dataset) => Arc::clone(dataset),
            _ => Arc::new(Dataset::empty()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Load state shared between the loader task and request handlers
///
/// Written once, by the load, and read by every request.
#[derive(Debug, Clone, Default)]
pub struct SharedDataset {
    state: Arc<RwLock<LoadState>>,
}

impl SharedDataset {
    /// A handle in the `Pending` state
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle already holding a dataset
    pub fn ready(dataset: Dataset) -> Self {
        Self {
            state: Arc::new(RwLock::new(LoadState::Ready(Arc::new(dataset)))),
        }
    }

    /// Current state
    pub async fn snapshot(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// Run the load against `source` and record its outcome
    ///
    /// Errors are logged and stored, never propagated: callers render an
    /// empty table when the load failed.
    pub async fn load_from<S: DataSource + ?Sized>(&self, source: &S) -> LoadStatus {
        tracing::info!(source = %source.describe(), "Loading customers and transactions");

        let next = match load(source).await {
            Ok(dataset) => LoadState::Ready(Arc::new(dataset)),
            Err(e) => {
                tracing::error!(source = %source.describe(), error = %e, "Failed to load data");
                LoadState::Failed(e.to_string())
            }
        };

        let status = next.status();
        *self.state.write().await = next;
        status
    }

    /// Start the load in a background task
    pub fn spawn_load(&self, source: Arc<dyn DataSource>) -> JoinHandle<LoadStatus> {
        let shared = self.clone();
        tokio::spawn(async move { shared.load_from(source.as_ref()).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Customer, CustomerId, Transaction};
    use async_trait::async_trait;

    struct FakeSource {
        customers: Vec<Customer>,
        transactions: Vec<Transaction>,
        fail_transactions: bool,
    }

    impl FakeSource {
        fn scenario() -> Self {
            Self {
                customers: vec![Customer::new(1, "Ann"), Customer::new(2, "Bo")],
                transactions: vec![
                    Transaction::new(1, "d1", 5.0),
                    Transaction::new(2, "d2", 50.0),
                ],
                fail_transactions: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_transactions: true,
                ..Self::scenario()
            }
        }
    }

    #[async_trait]
    impl DataSource for FakeSource {
        fn describe(&self) -> String {
            "fake".to_string()
        }

        async fn fetch_customers(&self) -> Result<Vec<Customer>, LoadError> {
            Ok(self.customers.clone())
        }

        async fn fetch_transactions(&self) -> Result<Vec<Transaction>, LoadError> {
            if self.fail_transactions {
                Err(LoadError::Unavailable("fake/transactions".to_string()))
            } else {
                Ok(self.transactions.clone())
            }
        }
    }

    #[tokio::test]
    async fn test_load_joins() {
        let dataset = load(&FakeSource::scenario()).await.unwrap();

        assert_eq!(dataset.len(), 2);
        let bo = dataset.find(&CustomerId::from(2)).unwrap();
        assert_eq!(bo.transactions.len(), 1);
        assert_eq!(bo.transactions[0].amount, 50.0);
    }

    #[tokio::test]
    async fn test_failed_fetch_reports_error() {
        let result = load(&FakeSource::failing()).await;
        assert!(matches!(result, Err(LoadError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_failed_load_leaves_empty_dataset() {
        let shared = SharedDataset::new();
        let status = shared.load_from(&FakeSource::failing()).await;

        assert_eq!(status, LoadStatus::Failed);
        let state = shared.snapshot().await;
        assert!(state.dataset().is_empty());
        assert!(state.error().unwrap().contains("unavailable"));
    }

    #[tokio::test]
    async fn test_spawned_load() {
        let shared = SharedDataset::new();
        assert_eq!(shared.snapshot().await.status(), LoadStatus::Pending);

        let source: Arc<dyn DataSource> = Arc::new(FakeSource::scenario());
        let status = shared.spawn_load(source).await.unwrap();

        assert_eq!(status, LoadStatus::Ready);
        assert_eq!(shared.snapshot().await.dataset().len(), 2);
    }
}
