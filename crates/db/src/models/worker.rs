//! Worker entity model and DTO.

use flotilla_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A worker row from the `workers` table.
///
/// `location` is the host or address the agent listens on; the agent
/// port comes from configuration, not from the catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Worker {
    pub id: DbId,
    pub name: String,
    pub location: String,
    pub created_at: Timestamp,
}

/// DTO for registering a new worker.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorker {
    pub name: String,
    pub location: String,
}
