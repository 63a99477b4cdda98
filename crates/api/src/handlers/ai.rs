//! The generative summary proxy.
//!
//! Keeps the provider credential server-side: clients send a finished
//! prompt, the server forwards it with its own credential and returns
//! the provider's raw JSON. Response normalization stays client-side,
//! where the payload shape is interpreted.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /ai/summary`.
#[derive(Debug, Deserialize)]
pub struct ProxyRequest {
    pub prompt: Option<String>,
    pub model: Option<String>,
}

/// POST /api/v1/ai/summary
///
/// - `400` when the prompt is missing or empty.
/// - `500` when no provider endpoint is configured.
/// - `502` when the provider call fails.
/// - `200` with `{ "ok": true, "result": <provider JSON> }` otherwise.
pub async fn proxy(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<ProxyRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let prompt = body
        .prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing prompt".into()))?;

    let client = state
        .generative
        .as_ref()
        .ok_or_else(|| AppError::InternalError("Generative provider not configured".into()))?;

    let result = client
        .generate(prompt, body.model.as_deref())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!({ "ok": true, "result": result })))
}
