//! # txlens
//!
//! Customer Transaction Viewer - fetches customers and transactions from a
//! remote feed, joins them, and serves a searchable table with charts.
//!
//! ## Modules
//!
//! - [`dataset`]: Customer and transaction records and the join
//! - [`source`]: Remote feed client and startup load state
//! - [`filter`]: Name and amount-prefix filters
//! - [`chart`]: Chart series for one customer or all customers
//! - [`view`]: Viewer state machine and page rendering
//! - [`api`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use txlens::{build_all, filter_by_name, join, Customer, Palette, Transaction};
//!
//! let dataset = join(
//!     vec![Customer::new(1, "Ann"), Customer::new(2, "Bo")],
//!     vec![
//!         Transaction::new(1, "2023-01-01", 5.0),
//!         Transaction::new(2, "2023-01-02", 50.0),
//!     ],
//! );
//!
//! let matches = filter_by_name(&dataset, "b");
//! println!("{} customer(s) match", matches.len());
//!
//! let series = build_all(&dataset, &mut Palette::seeded(42));
//! println!("{} dates on the axis", series.labels.len());
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod filter;
pub mod source;
pub mod view;

// Re-export top-level types for convenience
pub use dataset::{join, Customer, CustomerId, CustomerWithTransactions, Dataset, Transaction};

pub use source::{load, DataSource, HttpSource, LoadError, LoadState, LoadStatus, SharedDataset};

pub use filter::{canonical_amount, filter_by_amount_prefix, filter_by_name, Filter};

pub use chart::{build_all, build_single, ChartDataset, ChartError, ChartSeries, Palette};

pub use view::{render_page, update, Action, ActiveChart, PageModel, ViewError, ViewState};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig, SourceConfig};
