pub mod health;
pub mod jobs;
pub mod scripts;
pub mod workers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /scripts            GET list, POST register
/// /scripts/{id}       GET, DELETE
/// /workers            GET list, POST register
/// /workers/{id}       GET, DELETE
/// /jobs               GET list, POST launch
/// /jobs/{id}          GET, DELETE (stop)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/scripts", scripts::router())
        .nest("/workers", workers::router())
        .nest("/jobs", jobs::router())
}
