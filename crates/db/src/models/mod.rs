//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//!
//! Catalog rows are immutable once stored, so there are no update DTOs.

pub mod job;
pub mod script;
pub mod worker;
