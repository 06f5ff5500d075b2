//! Route definitions for the `/scripts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::scripts;
use crate::state::AppState;

/// Routes mounted at `/scripts`.
///
/// ```text
/// GET    /        -> list_scripts
/// POST   /        -> create_script
/// GET    /{id}    -> get_script
/// DELETE /{id}    -> delete_script
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scripts::list_scripts).post(scripts::create_script))
        .route(
            "/{id}",
            get(scripts::get_script).delete(scripts::delete_script),
        )
}
