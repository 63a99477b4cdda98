//! Handlers for per-task notes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use taskdeck_core::entities::{CreateTaskNote, TaskNote};
use taskdeck_core::types::EntityId;

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// Request body for `POST /tasks/{task_id}/notes`.
#[derive(Debug, Deserialize)]
pub struct TaskNoteBody {
    pub content: String,
}

/// POST /api/v1/tasks/{task_id}/notes
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<EntityId>,
    Json(body): Json<TaskNoteBody>,
) -> AppResult<(StatusCode, Json<TaskNote>)> {
    let input = CreateTaskNote {
        task_id,
        content: body.content,
    };
    input.validate()?;
    let note = state.store.create_task_note(user.uid, input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/v1/tasks/{task_id}/notes
pub async fn list_by_task(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(task_id): Path<EntityId>,
) -> AppResult<Json<Vec<TaskNote>>> {
    let notes = state.store.list_task_notes(user.uid(), task_id).await?;
    Ok(Json(notes))
}

/// DELETE /api/v1/task-notes/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    state.store.delete_task_note(user.uid, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
