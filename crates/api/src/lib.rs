//! Product catalog API server library.
//!
//! Exposes the building blocks (config, state, error handling, routing,
//! handlers) so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
