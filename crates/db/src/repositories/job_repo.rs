//! Repository for the `jobs` ledger.
//!
//! The ledger is append/delete only. The `uq_jobs_worker` unique
//! constraint enforces the one-job-per-worker invariant; `insert` is the
//! operation that can trip it under concurrent launches.

use sqlx::PgPool;

use flotilla_core::types::DbId;

use crate::models::job::{Job, JobDeployment};

/// Column list for `jobs` queries.
const COLUMNS: &str = "id, script_id, worker_id, launched_at";

/// Column list for joined deployment queries.
const DEPLOYMENT_COLUMNS: &str = "\
    j.id, j.script_id, j.worker_id, \
    s.name AS script_name, w.location AS worker_location, \
    j.launched_at";

/// Join clause resolving a job to its script name and worker location.
const DEPLOYMENT_JOIN: &str = "\
    jobs j \
    JOIN scripts s ON j.script_id = s.id \
    JOIN workers w ON j.worker_id = w.id";

/// Provides ledger operations for running jobs.
pub struct JobRepo;

impl JobRepo {
    /// Record a launched job.
    ///
    /// Callers must only invoke this after the worker agent acknowledged
    /// the start. A concurrent launch on the same worker violates
    /// `uq_jobs_worker` and surfaces as a database error.
    pub async fn insert(
        pool: &PgPool,
        script_id: DbId,
        worker_id: DbId,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (script_id, worker_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(script_id)
            .bind(worker_id)
            .fetch_one(pool)
            .await
    }

    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the job currently bound to a worker, if any.
    ///
    /// This is the launch pre-check. It is advisory only: the unique
    /// constraint on insert remains the final authority.
    pub async fn find_by_worker(
        pool: &PgPool,
        worker_id: DbId,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE worker_id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(worker_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a job to its script name and worker location (stop path).
    pub async fn find_deployment(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<JobDeployment>, sqlx::Error> {
        let query = format!(
            "SELECT {DEPLOYMENT_COLUMNS} FROM {DEPLOYMENT_JOIN} WHERE j.id = $1"
        );
        sqlx::query_as::<_, JobDeployment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all running jobs with script names and worker locations.
    pub async fn list(pool: &PgPool) -> Result<Vec<JobDeployment>, sqlx::Error> {
        let query = format!(
            "SELECT {DEPLOYMENT_COLUMNS} FROM {DEPLOYMENT_JOIN} ORDER BY j.launched_at ASC"
        );
        sqlx::query_as::<_, JobDeployment>(&query)
            .fetch_all(pool)
            .await
    }

    /// Remove a job from the ledger. Returns `false` when no row matched.
    ///
    /// Callers must only invoke this after the worker agent acknowledged
    /// the stop.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let rows = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }
}
