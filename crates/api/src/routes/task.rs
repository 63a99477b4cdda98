//! Route definitions for task-scoped resources.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{task, task_note};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                  -> list_all (caller's full backlog)
/// PATCH  /{id}              -> update
/// DELETE /{id}              -> delete
/// PATCH  /{id}/status       -> set_status (kanban move)
/// GET    /{id}/notes        -> list_by_task
/// POST   /{id}/notes        -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list_all))
        .route("/{id}", patch(task::update).delete(task::delete))
        .route("/{id}/status", patch(task::set_status))
        .route(
            "/{id}/notes",
            get(task_note::list_by_task).post(task_note::create),
        )
}
