//! Route definitions for the `/projects` resource.
//!
//! Also nests project-scoped tasks, notes, and files under
//! `/projects/{project_id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{file, note, project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                         -> list
/// POST   /                         -> create
/// GET    /{id}                     -> get_by_id (owner or public)
/// PATCH  /{id}                     -> update
/// DELETE /{id}                     -> delete (cascade + blob cleanup)
/// POST   /{id}/share               -> share (enable public link)
///
/// GET    /{id}/tasks               -> list_by_project
/// POST   /{id}/tasks               -> create
/// GET    /{id}/notes               -> list_by_project
/// POST   /{id}/notes               -> create
/// GET    /{id}/files               -> list_by_project
/// POST   /{id}/files               -> upload (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .patch(project::update)
                .delete(project::delete),
        )
        .route("/{id}/share", post(project::share))
        .route(
            "/{id}/tasks",
            get(task::list_by_project).post(task::create),
        )
        .route(
            "/{id}/notes",
            get(note::list_by_project).post(note::create),
        )
        .route(
            "/{id}/files",
            get(file::list_by_project).post(file::upload),
        )
}
