//! Handlers for project file attachments.
//!
//! Uploads are multipart: the blob goes to the [`BlobStore`] first,
//! then its metadata is recorded in the entity store. Deletion removes
//! the metadata, then the blob.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use taskdeck_core::entities::{NewProjectFile, ProjectFile};
use taskdeck_core::types::EntityId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// Blob-store key for a new upload. A fresh UUID per upload keeps
/// same-named files from clobbering each other.
fn storage_path(project_id: EntityId, file_name: &str) -> String {
    format!("projects/{}/{}/{}", project_id, Uuid::new_v4(), file_name)
}

/// POST /api/v1/projects/{project_id}/files (multipart)
///
/// Accepts a single `file` part. Stores the bytes, then the metadata.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<EntityId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProjectFile>)> {
    // Ownership is checked up front so an intruder's upload never
    // reaches the blob store. Public read access is not enough here.
    let project = state.store.get_project(Some(user.uid), project_id).await?;
    if project.owner_uid != user.uid {
        return Err(taskdeck_core::error::CoreError::PermissionDenied.into());
    }

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
        .ok_or_else(|| AppError::BadRequest("Missing file part".into()))?;

    let name = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("File part must have a filename".into()))?;
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read file part: {e}")))?;

    let path = storage_path(project_id, &name);
    let url = state
        .blobs
        .upload(&path, bytes.to_vec(), &content_type)
        .await?;

    let input = NewProjectFile {
        project_id,
        name,
        content_type,
        size_bytes: bytes.len() as i64,
        url,
        storage_path: path,
    };
    input.validate()?;

    let file = state.store.create_file(user.uid, input).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

/// GET /api/v1/projects/{project_id}/files
pub async fn list_by_project(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(project_id): Path<EntityId>,
) -> AppResult<Json<Vec<ProjectFile>>> {
    let files = state.store.list_files(user.uid(), project_id).await?;
    Ok(Json(files))
}

/// DELETE /api/v1/files/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let file = state.store.delete_file(user.uid, id).await?;

    if let Err(e) = state.blobs.delete(&file.storage_path).await {
        tracing::warn!(path = %file.storage_path, error = %e, "orphaned blob after file delete");
    }

    Ok(StatusCode::NO_CONTENT)
}
