//! Handlers for the `/workers` resource (the worker catalog).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use flotilla_core::error::CoreError;
use flotilla_core::types::DbId;
use flotilla_core::validate;
use flotilla_db::models::worker::CreateWorker;
use flotilla_db::repositories::WorkerRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/workers
///
/// Register a worker host. Returns 201 with the stored worker, 409 on a
/// duplicate name.
pub async fn create_worker(
    State(state): State<AppState>,
    Json(input): Json<CreateWorker>,
) -> AppResult<impl IntoResponse> {
    validate::validate_name("Worker", &input.name)?;
    validate::validate_location(&input.location)?;

    let worker = WorkerRepo::create(&state.pool, &input).await?;

    tracing::info!(
        worker_id = worker.id,
        worker_name = %worker.name,
        location = %worker.location,
        "Worker registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: worker })))
}

/// GET /api/v1/workers
pub async fn list_workers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workers = WorkerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: workers }))
}

/// GET /api/v1/workers/{id}
pub async fn get_worker(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let worker = WorkerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Worker",
            id,
        }))?;
    Ok(Json(DataResponse { data: worker }))
}

/// DELETE /api/v1/workers/{id}
///
/// Returns 204 on success, 404 if the worker does not exist, 409 if a
/// live job still references it.
pub async fn delete_worker(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = WorkerRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Worker",
            id,
        }));
    }

    tracing::info!(worker_id = id, "Worker deleted");

    Ok(StatusCode::NO_CONTENT)
}
