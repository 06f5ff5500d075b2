//! Repository for the `scripts` table.

use sqlx::PgPool;

use flotilla_core::types::DbId;

use crate::models::script::{CreateScript, Script};

/// Column list for `scripts` queries.
const COLUMNS: &str = "id, name, content, created_at";

/// Provides CRUD operations for the script catalog.
pub struct ScriptRepo;

impl ScriptRepo {
    /// Insert a new script.
    ///
    /// A duplicate name violates `uq_scripts_name` and surfaces as a
    /// database error for the caller to classify.
    pub async fn create(pool: &PgPool, dto: &CreateScript) -> Result<Script, sqlx::Error> {
        let query = format!(
            "INSERT INTO scripts (name, content) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Script>(&query)
            .bind(&dto.name)
            .bind(&dto.content)
            .fetch_one(pool)
            .await
    }

    /// Find a script by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Script>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scripts WHERE id = $1");
        sqlx::query_as::<_, Script>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all scripts ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Script>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scripts ORDER BY name ASC");
        sqlx::query_as::<_, Script>(&query).fetch_all(pool).await
    }

    /// Delete a script. Returns `false` when no row matched.
    ///
    /// A script referenced by a live job violates `fk_jobs_script`
    /// (RESTRICT) and surfaces as a database error; no row is touched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let rows = sqlx::query("DELETE FROM scripts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }
}
