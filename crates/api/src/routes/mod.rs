pub mod auth;
pub mod drawing;
pub mod health;
pub mod project;
pub mod share;
pub mod task;

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                     signup (public)
/// /auth/login                      login (public)
/// /auth/logout                     logout (requires auth)
///
/// /projects                        list, create
/// /projects/{id}                   get, update, delete
/// /projects/{id}/share             enable sharing (POST)
/// /projects/{id}/tasks             list, create
/// /projects/{id}/notes             list, create
/// /projects/{id}/files             list, upload (multipart)
///
/// /tasks                           list every task of the caller
/// /tasks/{id}                      update, delete
/// /tasks/{id}/status               set status (PATCH)
/// /tasks/{id}/notes                list, create
///
/// /notes/{id}                      update, delete
/// /task-notes/{id}                 delete
/// /files/{id}                      delete (metadata + blob)
///
/// /drawings                        list, create
/// /drawings/{id}                   get, update, delete (soft)
///
/// /summary                         get, put (per user, overwrite)
/// /ai/summary                      generative proxy (POST)
///
/// /share/{share_id}                public project read
/// /share/{share_id}/tasks          public task list
/// /share/{share_id}/notes          public note list
/// /share/{share_id}/files          public file list
///
/// /weather                         current weather (cached)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (signup, login, logout).
        .nest("/auth", auth::router())
        // Project routes (also nests tasks, notes, and files).
        .nest("/projects", project::router())
        // Task-scoped mutation, status changes, and task notes.
        .nest("/tasks", task::router())
        // Note-scoped mutation.
        .route(
            "/notes/{id}",
            patch(handlers::note::update).delete(handlers::note::delete),
        )
        .route("/task-notes/{id}", delete(handlers::task_note::delete))
        // File deletion (metadata and blob).
        .route("/files/{id}", delete(handlers::file::delete))
        // Whiteboard drawings.
        .nest("/drawings", drawing::router())
        // Stored per-user summary.
        .route(
            "/summary",
            get(handlers::summary::get).put(handlers::summary::put),
        )
        // Generative summary proxy.
        .route("/ai/summary", post(handlers::ai::proxy))
        // Public share links (unauthenticated, read-only).
        .nest("/share", share::router())
        // Weather widget.
        .route("/weather", get(handlers::weather::current))
}
