//! Handlers for the `/drawings` resource (whiteboard documents).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use taskdeck_core::entities::{CreateDrawing, Drawing};
use taskdeck_core::types::EntityId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PATCH /drawings/{id}`: replaces the stroke records.
#[derive(Debug, Deserialize)]
pub struct UpdateDrawingBody {
    pub records: Value,
}

/// POST /api/v1/drawings
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateDrawing>,
) -> AppResult<(StatusCode, Json<Drawing>)> {
    input.validate()?;
    let drawing = state.store.create_drawing(user.uid, input).await?;
    Ok((StatusCode::CREATED, Json(drawing)))
}

/// GET /api/v1/drawings
///
/// Soft-deleted drawings are excluded.
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Drawing>>> {
    let drawings = state.store.list_drawings(user.uid).await?;
    Ok(Json(drawings))
}

/// GET /api/v1/drawings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Drawing>> {
    let drawing = state.store.get_drawing(user.uid, id).await?;
    Ok(Json(drawing))
}

/// PATCH /api/v1/drawings/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
    Json(body): Json<UpdateDrawingBody>,
) -> AppResult<Json<Drawing>> {
    let drawing = state
        .store
        .update_drawing(user.uid, id, body.records)
        .await?;
    Ok(Json(drawing))
}

/// DELETE /api/v1/drawings/{id}
///
/// Soft delete: the drawing disappears from listings but its records
/// are retained.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    state.store.delete_drawing(user.uid, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
