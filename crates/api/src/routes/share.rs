//! Route definitions for public share links. No authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::share;
use crate::state::AppState;

/// Routes mounted at `/share`.
///
/// ```text
/// GET /{share_id}        -> get_project (public only)
/// GET /{share_id}/tasks  -> list_tasks
/// GET /{share_id}/notes  -> list_notes
/// GET /{share_id}/files  -> list_files
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{share_id}", get(share::get_project))
        .route("/{share_id}/tasks", get(share::list_tasks))
        .route("/{share_id}/notes", get(share::list_notes))
        .route("/{share_id}/files", get(share::list_files))
}
