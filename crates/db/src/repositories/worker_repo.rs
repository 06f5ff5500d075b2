//! Repository for the `workers` table.

use sqlx::PgPool;

use flotilla_core::types::DbId;

use crate::models::worker::{CreateWorker, Worker};

/// Column list for `workers` queries.
const COLUMNS: &str = "id, name, location, created_at";

/// Provides CRUD operations for the worker catalog.
pub struct WorkerRepo;

impl WorkerRepo {
    /// Register a new worker.
    ///
    /// A duplicate name violates `uq_workers_name` and surfaces as a
    /// database error for the caller to classify.
    pub async fn create(pool: &PgPool, dto: &CreateWorker) -> Result<Worker, sqlx::Error> {
        let query = format!(
            "INSERT INTO workers (name, location) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Worker>(&query)
            .bind(&dto.name)
            .bind(&dto.location)
            .fetch_one(pool)
            .await
    }

    /// Find a worker by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Worker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workers WHERE id = $1");
        sqlx::query_as::<_, Worker>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all workers ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Worker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workers ORDER BY name ASC");
        sqlx::query_as::<_, Worker>(&query).fetch_all(pool).await
    }

    /// Delete a worker. Returns `false` when no row matched.
    ///
    /// A worker referenced by a live job violates `fk_jobs_worker`
    /// (RESTRICT) and surfaces as a database error; no row is touched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let rows = sqlx::query("DELETE FROM workers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }
}
