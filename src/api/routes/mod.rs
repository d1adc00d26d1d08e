//! Routes
//!
//! Route handlers organized by functionality.

pub mod charts;
pub mod customers;
pub mod health;
pub mod page;
pub mod status;
