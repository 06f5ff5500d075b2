//! Flotilla API server library.
//!
//! Exposes the core building blocks (config, state, error handling,
//! deploy orchestration, routes) so integration tests and the binary
//! entrypoint can both access them.

pub mod config;
pub mod deploy;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
