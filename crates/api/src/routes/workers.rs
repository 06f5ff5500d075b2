//! Route definitions for the `/workers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::workers;
use crate::state::AppState;

/// Routes mounted at `/workers`.
///
/// ```text
/// GET    /        -> list_workers
/// POST   /        -> create_worker
/// GET    /{id}    -> get_worker
/// DELETE /{id}    -> delete_worker
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workers::list_workers).post(workers::create_worker))
        .route(
            "/{id}",
            get(workers::get_worker).delete(workers::delete_worker),
        )
}
