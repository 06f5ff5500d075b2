//! Job ledger entity models.
//!
//! A job binds one running script instance to one worker. Rows are only
//! ever created (after a launch ack) and deleted (after a stop ack),
//! never updated.

use flotilla_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub script_id: DbId,
    pub worker_id: DbId,
    pub launched_at: Timestamp,
}

/// A job joined with its script name and worker location.
///
/// This is the shape the orchestrator needs for the stop path (the agent
/// call takes the script name and the worker location) and what the
/// operator listing shows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobDeployment {
    pub id: DbId,
    pub script_id: DbId,
    pub worker_id: DbId,
    /// Joined from `scripts.name`.
    pub script_name: String,
    /// Joined from `workers.location`.
    pub worker_location: String,
    pub launched_at: Timestamp,
}

/// DTO for `POST /api/v1/jobs` (launch request).
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchJob {
    pub script_id: DbId,
    pub worker_id: DbId,
}
