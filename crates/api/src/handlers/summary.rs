//! Handlers for the per-user stored summary.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use taskdeck_core::entities::Summary;
use taskdeck_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /summary`.
#[derive(Debug, Deserialize)]
pub struct PutSummaryBody {
    pub summary: String,
}

/// GET /api/v1/summary
pub async fn get(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Summary>> {
    let summary = state
        .store
        .get_summary(user.uid)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Summary", user.uid)))?;
    Ok(Json(summary))
}

/// PUT /api/v1/summary
///
/// One summary per user; each write overwrites the previous one.
pub async fn put(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<PutSummaryBody>,
) -> AppResult<Json<Summary>> {
    let summary = state.store.upsert_summary(user.uid, body.summary).await?;
    Ok(Json(summary))
}
