//! Script entity model and DTO.

use flotilla_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered compose bundle from the `scripts` table.
///
/// The `content` column holds the compose definition verbatim; it is
/// opaque to the orchestrator and only ever forwarded to a worker agent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Script {
    pub id: DbId,
    pub name: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for registering a new script.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScript {
    pub name: String,
    pub content: String,
}
