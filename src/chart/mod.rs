//! Chart Series
//!
//! Builds the label/value structure consumed by the line-chart renderer.
//!
//! - [`build_single`]: one customer's amounts over its transaction dates
//! - [`build_all`]: every customer over a shared, sorted date axis
//! - [`Palette`]: seedable per-series colors

mod builder;
mod palette;
mod series;

pub use builder::{build_all, build_single, ChartError};
pub use palette::{Palette, SeriesColor};
pub use series::{ChartDataset, ChartSeries};
