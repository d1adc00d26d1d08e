//! Customer/transaction dataset
//!
//! The in-memory model the viewer works on:
//!
//! - [`CustomerId`]: identifiers canonicalized at ingestion
//! - [`Customer`], [`Transaction`]: records as served by the feed
//! - [`Dataset`]: customers joined with their transactions
//! - [`join`]: builds a [`Dataset`] from the two collections

mod ident;
mod join;
mod types;

pub use ident::CustomerId;
pub use join::join;
pub use types::{Customer, CustomerWithTransactions, Dataset, Transaction};
