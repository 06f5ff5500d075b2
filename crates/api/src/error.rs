use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use flotilla_agent::AgentError;
use flotilla_core::error::CoreError;

use crate::deploy::DeployError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`DeployError`] for
/// orchestration outcomes. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `flotilla_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A launch/stop orchestration outcome.
    #[error(transparent)]
    Deploy(#[from] DeployError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Orchestration outcomes ---
            AppError::Deploy(deploy) => classify_deploy_error(deploy),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an orchestration outcome into an HTTP status, code, and message.
///
/// Agent failures map to 502: the orchestrator itself is healthy, the
/// upstream worker agent is not. The two agent failure modes keep
/// distinct codes so callers can tell "never reached" from "declined".
fn classify_deploy_error(err: &DeployError) -> (StatusCode, &'static str, String) {
    match err {
        DeployError::ScriptNotFound(_)
        | DeployError::WorkerNotFound(_)
        | DeployError::JobNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),

        DeployError::WorkerBusy(_) => (StatusCode::CONFLICT, "WORKER_BUSY", err.to_string()),

        DeployError::Launch(agent) | DeployError::Stop(agent) => {
            let code = match agent {
                AgentError::Unreachable(_) => "AGENT_UNREACHABLE",
                AgentError::Rejected { .. } => "AGENT_REJECTED",
            };
            (StatusCode::BAD_GATEWAY, code, err.to_string())
        }

        DeployError::Database(db) => classify_sqlx_error(db),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Foreign-key violations (constraint name starting with `fk_`) map to 409:
///   the only FKs in the schema are the ledger's RESTRICT references, so a
///   violation means a catalog row is pinned by a live job.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");

            // PostgreSQL unique constraint violation: SQLSTATE 23505.
            if db_err.code().as_deref() == Some("23505") && constraint.starts_with("uq_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }

            // PostgreSQL foreign-key violation: SQLSTATE 23503.
            if db_err.code().as_deref() == Some("23503") && constraint.starts_with("fk_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "Entity is referenced by a live job and cannot be deleted".to_string(),
                );
            }

            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
