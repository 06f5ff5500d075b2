//! Launch/stop orchestration for compose bundles on remote workers.

mod orchestrator;

pub use orchestrator::DeployOrchestrator;

use flotilla_agent::AgentError;
use flotilla_core::types::DbId;

/// Structured outcomes of a launch or stop attempt.
///
/// None of these are swallowed: every variant reaches the caller, and
/// the caller alone decides whether to retry. Stop is safe to repeat
/// while the row exists; Launch is not, because re-issuing re-triggers a
/// remote start against a worker that may already be busy.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("Script {0} not found")]
    ScriptNotFound(DbId),

    #[error("Worker {0} not found")]
    WorkerNotFound(DbId),

    #[error("Job {0} not found")]
    JobNotFound(DbId),

    /// The worker already runs a job, detected either by the ledger
    /// pre-check or by the unique constraint at insert time.
    #[error("Worker {0} is already running a job")]
    WorkerBusy(DbId),

    /// The agent did not acknowledge the start. No ledger row was written.
    #[error("Launch failed: {0}")]
    Launch(#[source] AgentError),

    /// The agent did not acknowledge the stop. The ledger row is intact
    /// and the stop can be retried.
    #[error("Stop failed: {0}")]
    Stop(#[source] AgentError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
