//! Feed HTTP Client
//!
//! Fetches the customer and transaction collections over HTTP GET.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::LoadError;
use super::payload::decode_collection;
use crate::config::SourceConfig;
use crate::dataset::{Customer, Transaction};

/// Anything that can serve the two collections
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    async fn fetch_customers(&self) -> Result<Vec<Customer>, LoadError>;

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, LoadError>;
}

/// HTTP implementation of [`DataSource`]
pub struct HttpSource {
    client: Client,
    config: SourceConfig,
}

impl HttpSource {
    /// Create a new client for the given feed
    pub fn new(config: SourceConfig) -> Result<Self, LoadError> {
        let mut builder = Client::builder();
        if config.request_timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.request_timeout_ms));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        collection: &'static str,
    ) -> Result<Vec<T>, LoadError> {
        let url = self.url(path);
        tracing::debug!(url = %url, collection, "Fetching collection");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::from_transport(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::from_transport(&url, e))?;

        let items = decode_collection(&body, collection)?;
        tracing::debug!(url = %url, count = items.len(), "Collection fetched");
        Ok(items)
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.config.base_url.clone()
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, LoadError> {
        self.get_collection(&self.config.customers_path, "customers")
            .await
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, LoadError> {
        self.get_collection(&self.config.transactions_path, "transactions")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CustomerId;
    use crate::source::{LoadStatus, SharedDataset};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    /// Serve `router` on an ephemeral local port, returning its base URL
    async fn spawn_feed(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn feed_router() -> Router {
        Router::new()
            .route(
                "/customers",
                get(|| async { Json(json!([{"id": 1, "name": "Ann"}, {"id": "2", "name": "Bo"}])) }),
            )
            .route(
                "/transactions",
                get(|| async {
                    Json(json!({"transactions": [
                        {"customer_id": "1", "date": "d1", "amount": 5},
                        {"customer_id": 2, "date": "d2", "amount": 50}
                    ]}))
                }),
            )
    }

    #[test]
    fn test_url_joining() {
        let source = HttpSource::new(SourceConfig::new("http://localhost:3002/")).unwrap();
        assert_eq!(source.url("/customers"), "http://localhost:3002/customers");
        assert_eq!(source.url("customers"), "http://localhost:3002/customers");
    }

    #[tokio::test]
    async fn test_fetch_both_shapes() {
        let base_url = spawn_feed(feed_router()).await;
        let source = HttpSource::new(SourceConfig::new(base_url)).unwrap();

        let customers = source.fetch_customers().await.unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[1].id, CustomerId::from(2));

        let transactions = source.fetch_transactions().await.unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].customer_id, CustomerId::from(1));
    }

    #[tokio::test]
    async fn test_error_status() {
        let router = Router::new().route("/customers", get(|| async { StatusCode::BAD_GATEWAY }));
        let base_url = spawn_feed(router).await;
        let source = HttpSource::new(SourceConfig::new(base_url)).unwrap();

        let err = source.fetch_customers().await.unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 502, .. }));

        // Unrouted path
        let err = source.fetch_transactions().await.unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::new(SourceConfig::new(format!("http://{}", addr))).unwrap();
        let err = source.fetch_customers().await.unwrap_err();
        assert!(matches!(err, LoadError::Unavailable(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_request_timeout() {
        async fn slow() -> Json<serde_json::Value> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!([]))
        }
        let router = Router::new()
            .route("/customers", get(slow))
            .route("/transactions", get(slow));
        let base_url = spawn_feed(router).await;

        let mut config = SourceConfig::new(base_url);
        config.request_timeout_ms = 100;
        let source = HttpSource::new(config).unwrap();

        let err = source.fetch_customers().await.unwrap_err();
        assert!(matches!(err, LoadError::Timeout(_)), "{:?}", err);

        let shared = SharedDataset::new();
        let status = shared.load_from(&source).await;
        assert_eq!(status, LoadStatus::Failed);

        let state = shared.snapshot().await;
        assert!(state.error().unwrap().contains("timed out"));
        assert!(state.dataset().is_empty());
    }
}
