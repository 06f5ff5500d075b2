//! Shared domain types, errors, and pure validation helpers.
//!
//! This crate has no internal dependencies; everything else in the
//! workspace builds on it.

pub mod error;
pub mod types;
pub mod validate;
