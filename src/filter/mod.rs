//! Customer search
//!
//! Two independent predicates over the full dataset:
//!
//! - **Name**: case-insensitive prefix of the customer name
//! - **Amount**: prefix of any transaction amount's canonical text
//!
//! ```rust,ignore
//! use txlens::filter::{Filter, filter_by_name};
//!
//! let view = filter_by_name(&dataset, "an");
//! let view = Filter::AmountPrefix("5".into()).apply(&dataset);
//! ```

mod amount;
mod engine;

pub use amount::canonical_amount;
pub use engine::{filter_by_amount_prefix, filter_by_name, Filter};
