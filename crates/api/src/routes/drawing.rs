//! Route definitions for the `/drawings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::drawing;
use crate::state::AppState;

/// Routes mounted at `/drawings`.
///
/// ```text
/// GET    /      -> list (excludes soft-deleted)
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PATCH  /{id}  -> update (replace records)
/// DELETE /{id}  -> delete (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(drawing::list).post(drawing::create))
        .route(
            "/{id}",
            get(drawing::get_by_id)
                .patch(drawing::update)
                .delete(drawing::delete),
        )
}
