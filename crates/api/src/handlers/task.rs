//! Handlers for tasks (project-scoped creation/listing, task-scoped
//! mutation, and the kanban status transition).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use taskdeck_core::entities::{CreateTask, Task, TaskStatus, UpdateTask};
use taskdeck_core::types::EntityId;

use crate::error::AppResult;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// Request body for `POST /projects/{project_id}/tasks`. The project
/// comes from the path.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<TaskStatus>,
}

/// Request body for `PATCH /tasks/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusBody {
    pub status: TaskStatus,
}

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<EntityId>,
    Json(body): Json<CreateTaskBody>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let input = CreateTask {
        project_id,
        title: body.title,
        description: body.description,
        status: body.status,
    };
    input.validate()?;
    let task = state.store.create_task(user.uid, input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks
///
/// Every task across the caller's projects; the summary flow pulls its
/// backlog from here.
pub async fn list_all(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = state.store.list_tasks_for_owner(user.uid).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/projects/{project_id}/tasks
pub async fn list_by_project(
    State(state): State<AppState>,
    user: MaybeAuthUser,
    Path(project_id): Path<EntityId>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = state.store.list_tasks(user.uid(), project_id).await?;
    Ok(Json(tasks))
}

/// PATCH /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    let task = state.store.update_task(user.uid, id, input).await?;
    Ok(Json(task))
}

/// PATCH /api/v1/tasks/{id}/status
///
/// The board's optimistic drag-and-drop persists through this route;
/// the response body is the authoritative task the client reconciles
/// against.
pub async fn set_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
    Json(body): Json<SetStatusBody>,
) -> AppResult<Json<Task>> {
    let task = state.store.set_task_status(user.uid, id, body.status).await?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    state.store.delete_task(user.uid, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
