//! Domain types, errors and pure validation logic for the product catalog.
//!
//! This crate has no I/O dependencies so it can be shared by the repository
//! layer and the HTTP layer alike.

pub mod error;
pub mod listing;
pub mod product;
pub mod types;
