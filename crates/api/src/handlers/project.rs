//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use taskdeck_core::entities::{CreateProject, Project, UpdateProject};
use taskdeck_core::types::EntityId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// Response of `POST /projects/{id}/share`.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// Full link to hand out, e.g. `https://app.example.com/#/share/ab12`.
    pub share_url: String,
    pub share_id: String,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;
    let project = state.store.create_project(user.uid, input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Project>>> {
    let projects = state.store.list_projects(user.uid).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
///
/// Owners always see their project; anyone may read it once sharing is
/// enabled.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Project>> {
    let project = state.store.get_project(user.uid(), id).await?;
    Ok(Json(project))
}

/// PATCH /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = state.store.update_project(user.uid, id, input).await?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Cascades through tasks, task notes, notes, and files, then removes
/// the stored blobs of the deleted files.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let removed_files = state.store.delete_project(user.uid, id).await?;

    // Blob cleanup is best-effort; the metadata is already gone and a
    // leaked object is preferable to a failed delete.
    for file in &removed_files {
        if let Err(e) = state.blobs.delete(&file.storage_path).await {
            tracing::warn!(path = %file.storage_path, error = %e, "orphaned blob after project delete");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/{id}/share
///
/// Turn on public sharing and return the stable share link. Repeated
/// calls return the same link.
pub async fn share(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<ShareResponse>> {
    let project = state.store.enable_sharing(user.uid, id).await?;
    let share_id = project.share_id.ok_or_else(|| {
        AppError::InternalError(format!("enable_sharing left project {id} without a share id"))
    })?;
    let share_url = format!("{}/#/share/{}", state.config.share_base_url, share_id);
    Ok(Json(ShareResponse { share_url, share_id }))
}
