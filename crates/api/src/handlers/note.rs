//! Handlers for project notes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use taskdeck_core::entities::{CreateNote, Note};
use taskdeck_core::types::EntityId;

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// Request body for note creation and update.
#[derive(Debug, Deserialize)]
pub struct NoteBody {
    pub content: String,
}

/// POST /api/v1/projects/{project_id}/notes
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<EntityId>,
    Json(body): Json<NoteBody>,
) -> AppResult<(StatusCode, Json<Note>)> {
    let input = CreateNote {
        project_id,
        content: body.content,
    };
    input.validate()?;
    let note = state.store.create_note(user.uid, input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/v1/projects/{project_id}/notes
pub async fn list_by_project(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(project_id): Path<EntityId>,
) -> AppResult<Json<Vec<Note>>> {
    let notes = state.store.list_notes(user.uid(), project_id).await?;
    Ok(Json(notes))
}

/// PATCH /api/v1/notes/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
    Json(body): Json<NoteBody>,
) -> AppResult<Json<Note>> {
    let note = state.store.update_note(user.uid, id, body.content).await?;
    Ok(Json(note))
}

/// DELETE /api/v1/notes/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    state.store.delete_note(user.uid, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
