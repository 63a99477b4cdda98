//! Periodic refresh of the fallback-location weather cache.
//!
//! Keeps the widget's most likely lookup warm so the first dashboard
//! load after a quiet period does not block on the provider. Runs on a
//! fixed interval until cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::weather::WeatherService;

/// How often the fallback location is re-fetched.
const REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Run the weather refresh loop until `cancel` is triggered.
pub async fn run(weather: Arc<WeatherService>, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = REFRESH_INTERVAL.as_secs(),
        "Weather refresh job started"
    );

    let mut interval = tokio::time::interval(REFRESH_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Weather refresh job stopping");
                break;
            }
            _ = interval.tick() => {
                match weather.refresh_fallback().await {
                    Ok(()) => tracing::debug!("Weather refresh: fallback location updated"),
                    Err(e) => tracing::warn!(error = %e, "Weather refresh failed"),
                }
            }
        }
    }
}
