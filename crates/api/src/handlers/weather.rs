//! Handler for the dashboard weather widget.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::weather::WeatherReport;

/// Optional coordinates from the browser's geolocation. Both must be
/// present to take effect; otherwise the configured fallback is used.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// GET /api/v1/weather
pub async fn current(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<WeatherReport>> {
    let (lat, lon) = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => state.weather.fallback_coords(),
    };

    let report = state.weather.current(lat, lon).await?;
    Ok(Json(report))
}
