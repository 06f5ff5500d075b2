//! Route definitions for the `/jobs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /        -> list_jobs
/// POST   /        -> launch_job
/// GET    /{id}    -> get_job
/// DELETE /{id}    -> stop_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list_jobs).post(jobs::launch_job))
        .route("/{id}", get(jobs::get_job).delete(jobs::stop_job))
}
