//! txlens Server
//!
//! Run with: cargo run -- --source-url http://localhost:3002
//!
//! # Configuration
//!
//! Read from `--config`, or the first of `~/.config/txlens/config.toml`,
//! `/etc/txlens/config.toml` and `./config.toml`. Environment variables
//! override the file:
//! - `TXLENS_SOURCE_URL`: Base URL of the customer/transaction feed
//! - `TXLENS_REQUEST_TIMEOUT_MS`: Per-request timeout, 0 disables it
//! - `TXLENS_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TXLENS_PORT`: Port to listen on (default: 3000)
//! - `TXLENS_LOG_LEVEL`: Log level (default: info)
//! - `TXLENS_LOG_FORMAT`: `pretty` or `json`
//! - `RUST_LOG`: Full filter directive, wins over the log level

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use txlens::api::{serve, AppState};
use txlens::config::{generate_default_config, Config, LoggingConfig};
use txlens::source::{HttpSource, SharedDataset};

#[derive(Parser)]
#[command(name = "txlens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Searchable customer transaction table with charts")]
struct Args {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the customer/transaction feed
    #[arg(long)]
    source_url: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    // Config discovery logs through a temporary subscriber; the configured
    // one can only be installed once the logging section is known
    let mut config = tracing::subscriber::with_default(bootstrap_subscriber(), || {
        match &args.config {
            Some(path) => Config::load_with_env(path)
                .with_context(|| format!("loading config from {}", path.display())),
            None => Ok(Config::load_default()),
        }
    })?;
    if let Some(url) = args.source_url {
        config.source.base_url = url;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting txlens v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(source = %config.source.base_url, "Customer/transaction feed");

    let source = HttpSource::new(config.source.clone()).context("building feed client")?;

    // The page is served while the feed loads
    let dataset = SharedDataset::new();
    dataset.spawn_load(Arc::new(source));

    let state = AppState::new(dataset, config.server.clone());
    serve(state).await.context("running server")?;

    tracing::info!("txlens stopped");
    Ok(())
}

fn bootstrap_subscriber() -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "txlens=info".into()),
        )
        .finish()
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("txlens={},tower_http=info", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
