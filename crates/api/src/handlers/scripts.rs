//! Handlers for the `/scripts` resource (the compose-bundle catalog).
//!
//! Scripts are immutable: they are registered, listed, fetched, and
//! deleted, never updated. Deletion is refused while a job references
//! the script (ledger FK, RESTRICT).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use flotilla_core::error::CoreError;
use flotilla_core::types::DbId;
use flotilla_core::validate;
use flotilla_db::models::script::CreateScript;
use flotilla_db::repositories::ScriptRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/scripts
///
/// Register a compose bundle. Returns 201 with the stored script, 409 on
/// a duplicate name.
pub async fn create_script(
    State(state): State<AppState>,
    Json(input): Json<CreateScript>,
) -> AppResult<impl IntoResponse> {
    validate::validate_name("Script", &input.name)?;
    validate::validate_bundle(&input.content)?;

    let script = ScriptRepo::create(&state.pool, &input).await?;

    tracing::info!(script_id = script.id, script_name = %script.name, "Script registered");

    Ok((StatusCode::CREATED, Json(DataResponse { data: script })))
}

/// GET /api/v1/scripts
pub async fn list_scripts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let scripts = ScriptRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: scripts }))
}

/// GET /api/v1/scripts/{id}
pub async fn get_script(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let script = ScriptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Script",
            id,
        }))?;
    Ok(Json(DataResponse { data: script }))
}

/// DELETE /api/v1/scripts/{id}
///
/// Returns 204 on success, 404 if the script does not exist, 409 if a
/// live job still references it.
pub async fn delete_script(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ScriptRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Script",
            id,
        }));
    }

    tracing::info!(script_id = id, "Script deleted");

    Ok(StatusCode::NO_CONTENT)
}
