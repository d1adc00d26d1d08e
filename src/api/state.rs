//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::chart::Palette;
use crate::config::ServerConfig;
use crate::source::SharedDataset;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Startup load of the customer/transaction feed
    pub dataset: SharedDataset,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Fixed seed for chart colors; random per build when unset
    pub color_seed: Option<u64>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(dataset: SharedDataset, config: ServerConfig) -> Self {
        Self {
            dataset,
            config: Arc::new(config),
            start_time: Instant::now(),
            color_seed: None,
        }
    }

    /// Use reproducible chart colors
    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = Some(seed);
        self
    }

    /// Palette for one chart build
    pub fn palette(&self) -> Palette {
        match self.color_seed {
            Some(seed) => Palette::seeded(seed),
            None => Palette::from_entropy(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
