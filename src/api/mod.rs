//! txlens HTTP API
//!
//! HTTP layer for the viewer, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Viewer page (`?by=name|amount&name=..&amount=..&chart=<id>|all`)
//!
//! ## Customers
//! - `GET /api/v1/customers` - Filtered view (`?name=` or `?amount=`)
//!
//! ## Charts
//! - `GET /api/v1/charts/all` - All customers series
//! - `GET /api/v1/charts/customers/:id` - Single customer series
//!
//! ## Status
//! - `GET /api/v1/status` - Dataset load status
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use txlens::api::{serve, AppState};
//! use txlens::config::Config;
//! use txlens::source::{HttpSource, SharedDataset};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let dataset = SharedDataset::new();
//!     dataset.spawn_load(Arc::new(HttpSource::new(config.source.clone())?));
//!
//!     serve(AppState::new(dataset, config.server.clone())).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{http::HeaderValue, http::Method, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/customers", get(routes::customers::list_customers))
        .route("/charts/all", get(routes::charts::all_customers_chart))
        .route("/charts/customers/:id", get(routes::charts::customer_chart))
        .route("/status", get(routes::status::load_status));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive unless origins are configured
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
}

/// Start the server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("txlens listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("txlens shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{join, Customer, Transaction};
    use crate::config::SourceConfig;
    use crate::source::{HttpSource, SharedDataset};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let dataset = join(
            vec![Customer::new(1, "Ann"), Customer::new(2, "Bo")],
            vec![
                Transaction::new(1, "2023-01-01", 5.0),
                Transaction::new(2, "2023-01-02", 50.0),
            ],
        );
        let state = AppState::new(SharedDataset::ready(dataset), ServerConfig::default())
            .with_color_seed(7);
        build_router(state)
    }

    fn create_pending_app() -> Router {
        build_router(AppState::new(SharedDataset::new(), ServerConfig::default()))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _) = get(create_pending_app(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (status, _) = get(create_test_app(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = get(create_pending_app(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = get_json(create_pending_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "starting");
        assert_eq!(body["dataset"], "pending");
    }

    #[tokio::test]
    async fn test_page_renders_rows() {
        let (status, html) = get(create_test_app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(html.matches("<th scope=\"row\">").count(), 2);
    }

    #[tokio::test]
    async fn test_page_name_search() {
        let (_, html) = get(create_test_app(), "/?by=name&name=b").await;
        assert_eq!(html.matches("<th scope=\"row\">").count(), 1);
        assert!(html.contains("<td>Bo</td>"));
        assert!(!html.contains("<td>Ann</td>"));
    }

    #[tokio::test]
    async fn test_page_chart_missing_customer() {
        let (status, html) = get(create_test_app(), "/?chart=404").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("No customer with id 404"));
        assert!(!html.contains("chartContainer"));
    }

    #[tokio::test]
    async fn test_page_while_loading() {
        let (status, html) = get(create_pending_app(), "/?chart=all").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Loading…"));
        assert!(html.contains("Data is still loading"));
        assert!(!html.contains("chartContainer"));
        assert!(!html.contains("Showing All Customers Transactions"));
    }

    #[tokio::test]
    async fn test_page_after_failed_load() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::new(SourceConfig::new(format!("http://{}", addr))).unwrap();
        let dataset = SharedDataset::new();
        dataset.load_from(&source).await;
        let app = build_router(AppState::new(dataset, ServerConfig::default()));

        let (status, html) = get(app, "/?chart=all").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("No data to chart"));
        assert!(!html.contains("chartContainer"));
    }

    #[tokio::test]
    async fn test_list_customers() {
        let (status, body) = get_json(create_test_app(), "/api/v1/customers?amount=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["filter"]["by"], "amount_prefix");

        let (_, body) = get_json(create_test_app(), "/api/v1/customers?name=B").await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["customers"][0]["name"], "Bo");
        assert_eq!(body["customers"][0]["Transactions"][0]["amount"], 50.0);
    }

    #[tokio::test]
    async fn test_list_customers_rejects_both_filters() {
        let (status, body) =
            get_json(create_test_app(), "/api/v1/customers?name=a&amount=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_customer_chart() {
        let (status, body) = get_json(create_test_app(), "/api/v1/charts/customers/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["labels"], serde_json::json!(["2023-01-01"]));
        assert_eq!(body["datasets"][0]["label"], "Ann");
        assert_eq!(body["datasets"][0]["data"], serde_json::json!([5.0]));
    }

    #[tokio::test]
    async fn test_customer_chart_not_found() {
        let (status, body) = get_json(create_test_app(), "/api/v1/charts/customers/9").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_all_chart() {
        let (status, body) = get_json(create_test_app(), "/api/v1/charts/all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["labels"], serde_json::json!(["2023-01-01", "2023-01-02"]));
        assert_eq!(body["datasets"][0]["data"], serde_json::json!([5.0, null]));
        assert_eq!(body["datasets"][1]["data"], serde_json::json!([null, 50.0]));

        let (status, _) = get(create_pending_app(), "/api/v1/charts/all").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_status() {
        let (status, body) = get_json(create_test_app(), "/api/v1/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["customers"], 2);
        assert_eq!(body["transactions"], 2);
        assert!(body.get("error").is_none());
    }
}
