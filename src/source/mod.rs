//! Customer/Transaction Feed
//!
//! Loads the two collections the viewer works on.
//!
//! ## Architecture
//!
//! - **DataSource**: trait for anything serving the collections
//! - **HttpSource**: HTTP GET client for the remote feed
//! - **load**: parallel fetch of both collections, then join
//! - **SharedDataset**: records the single startup load for request handlers

mod client;
mod error;
mod loader;
mod payload;

pub use client::{DataSource, HttpSource};
pub use error::LoadError;
pub use loader::{load, LoadState, LoadStatus, SharedDataset};
pub use payload::decode_collection;
