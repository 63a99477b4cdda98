//! Unauthenticated read-only access to shared projects.
//!
//! Everything here resolves a share id to its public project first; a
//! project that is missing or not public answers 404 without hinting
//! whether it exists.

use axum::extract::{Path, State};
use axum::Json;

use taskdeck_core::entities::{Note, Project, ProjectFile, Task};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/share/{share_id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> AppResult<Json<Project>> {
    let project = state.store.find_project_by_share_id(&share_id).await?;
    Ok(Json(project))
}

/// GET /api/v1/share/{share_id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> AppResult<Json<Vec<Task>>> {
    let project = state.store.find_project_by_share_id(&share_id).await?;
    let tasks = state.store.list_tasks(None, project.id).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/share/{share_id}/notes
pub async fn list_notes(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> AppResult<Json<Vec<Note>>> {
    let project = state.store.find_project_by_share_id(&share_id).await?;
    let notes = state.store.list_notes(None, project.id).await?;
    Ok(Json(notes))
}

/// GET /api/v1/share/{share_id}/files
pub async fn list_files(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> AppResult<Json<Vec<ProjectFile>>> {
    let project = state.store.find_project_by_share_id(&share_id).await?;
    let files = state.store.list_files(None, project.id).await?;
    Ok(Json(files))
}
