//! figbridge API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! tool layer) so integration tests and the binary entrypoint assemble the
//! same application.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod tools;
