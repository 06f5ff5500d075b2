//! Central deploy orchestrator service.
//!
//! Ties catalog lookups, the single-job-per-worker invariant, the agent
//! directive, and the job ledger together into one logically atomic
//! operation. Held in [`AppState`](crate::state::AppState) as an
//! `Arc<DeployOrchestrator>`.
//!
//! There is no distributed transaction spanning the agent call, so the
//! ledger mutation is ordered strictly after the remote acknowledgment
//! in both directions: a job is never claimed as running before the
//! agent confirms the start, and never forgotten before the agent
//! confirms the teardown. The price is a possible orphaned remote
//! bundle when the post-ack insert loses the uniqueness race; that case
//! is surfaced to the operator, never resolved silently.

use std::sync::Arc;

use flotilla_agent::ComposeAgent;
use flotilla_core::types::DbId;
use flotilla_db::models::job::Job;
use flotilla_db::repositories::{JobRepo, ScriptRepo, WorkerRepo};
use flotilla_db::DbPool;

use super::DeployError;

/// Name of the ledger constraint enforcing one job per worker.
const JOB_WORKER_CONSTRAINT: &str = "uq_jobs_worker";

/// Orchestrates bundle launches and stops across the worker fleet.
pub struct DeployOrchestrator {
    pool: DbPool,
    agent: Arc<dyn ComposeAgent>,
}

impl DeployOrchestrator {
    /// Create a new orchestrator over the given pool and agent transport.
    pub fn new(pool: DbPool, agent: Arc<dyn ComposeAgent>) -> Self {
        Self { pool, agent }
    }

    /// Launch a script on a worker.
    ///
    /// Lifecycle:
    /// 1. Resolve the script from the catalog.
    /// 2. Resolve the worker from the catalog.
    /// 3. Check the ledger for a job already bound to the worker. This
    ///    pre-check is advisory; the ledger's unique constraint at step 5
    ///    is the final authority.
    /// 4. Direct the worker's agent to bring the bundle up. On any agent
    ///    failure, return without touching the ledger — the agent's own
    ///    idempotent handling covers a partially applied start, and we
    ///    cannot distinguish "never received" from "ack lost".
    /// 5. Insert the job row. A unique violation here means a concurrent
    ///    launch won the race after our pre-check: the bundle we started
    ///    is now running unregistered, which is reported as `WorkerBusy`
    ///    and logged for manual reconciliation.
    pub async fn launch(&self, script_id: DbId, worker_id: DbId) -> Result<Job, DeployError> {
        let script = ScriptRepo::find_by_id(&self.pool, script_id)
            .await?
            .ok_or(DeployError::ScriptNotFound(script_id))?;

        let worker = WorkerRepo::find_by_id(&self.pool, worker_id)
            .await?
            .ok_or(DeployError::WorkerNotFound(worker_id))?;

        if JobRepo::find_by_worker(&self.pool, worker_id).await?.is_some() {
            return Err(DeployError::WorkerBusy(worker_id));
        }

        self.agent
            .up(&worker.location, &script.name, &script.content)
            .await
            .map_err(|e| {
                tracing::warn!(
                    script_id,
                    worker_id,
                    location = %worker.location,
                    error = %e,
                    "Agent did not acknowledge start; ledger untouched",
                );
                DeployError::Launch(e)
            })?;

        match JobRepo::insert(&self.pool, script_id, worker_id).await {
            Ok(job) => {
                tracing::info!(
                    job_id = job.id,
                    script_id,
                    worker_id,
                    script_name = %script.name,
                    location = %worker.location,
                    "Job launched",
                );
                Ok(job)
            }
            Err(e) if flotilla_db::is_unique_violation(&e, JOB_WORKER_CONSTRAINT) => {
                // A concurrent launch won the insert after our pre-check
                // passed. The bundle we started is running on the worker
                // but has no ledger row; the operator must reconcile by
                // issuing a down directive against the agent directly.
                tracing::error!(
                    script_id,
                    worker_id,
                    script_name = %script.name,
                    location = %worker.location,
                    "Launch lost the ledger insert race; bundle is running unregistered on the worker",
                );
                Err(DeployError::WorkerBusy(worker_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Stop a running job.
    ///
    /// Lifecycle:
    /// 1. Resolve the job joined with its script name and worker location.
    /// 2. Direct the worker's agent to tear the bundle down. On any agent
    ///    failure, return with the row intact — the ledger keeps
    ///    reflecting the (possibly zombied) job so the stop can be
    ///    retried safely.
    /// 3. Delete the job row.
    pub async fn stop(&self, job_id: DbId) -> Result<(), DeployError> {
        let deployment = JobRepo::find_deployment(&self.pool, job_id)
            .await?
            .ok_or(DeployError::JobNotFound(job_id))?;

        self.agent
            .down(&deployment.worker_location, &deployment.script_name)
            .await
            .map_err(|e| {
                tracing::warn!(
                    job_id,
                    script_name = %deployment.script_name,
                    location = %deployment.worker_location,
                    error = %e,
                    "Agent did not acknowledge stop; job row left intact",
                );
                DeployError::Stop(e)
            })?;

        JobRepo::delete(&self.pool, job_id).await?;

        tracing::info!(
            job_id,
            script_name = %deployment.script_name,
            location = %deployment.worker_location,
            "Job stopped",
        );
        Ok(())
    }
}
