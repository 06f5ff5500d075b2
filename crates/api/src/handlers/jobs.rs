//! Handlers for the `/jobs` resource.
//!
//! Launch and stop delegate to the [`DeployOrchestrator`]; the handlers
//! here only translate between HTTP and orchestration outcomes.
//!
//! [`DeployOrchestrator`]: crate::deploy::DeployOrchestrator

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use flotilla_core::error::CoreError;
use flotilla_core::types::DbId;
use flotilla_db::models::job::LaunchJob;
use flotilla_db::repositories::JobRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/jobs
///
/// List running jobs with their script names and worker locations.
pub async fn list_jobs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let jobs = JobRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = JobRepo::find_deployment(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Job", id }))?;
    Ok(Json(DataResponse { data: job }))
}

/// POST /api/v1/jobs
///
/// Launch a script on a worker. Returns 201 with the job on success,
/// 404 for an unknown script or worker, 409 while the worker is busy,
/// 502 when the agent is unreachable or rejects the start.
pub async fn launch_job(
    State(state): State<AppState>,
    Json(input): Json<LaunchJob>,
) -> AppResult<impl IntoResponse> {
    let job = state
        .orchestrator
        .launch(input.script_id, input.worker_id)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

/// DELETE /api/v1/jobs/{id}
///
/// Stop a running job. Returns 204 on success, 404 for an unknown job,
/// 502 when the agent is unreachable or rejects the stop (the job row is
/// left intact, so the call can be retried).
pub async fn stop_job(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.orchestrator.stop(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
