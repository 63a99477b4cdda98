//! Weather lookups for the dashboard widget.
//!
//! Proxies an OpenWeatherMap-compatible endpoint, caching each
//! coordinate pair for five minutes so widget refreshes do not hammer
//! the provider. Without an API key the service serves plausible demo
//! data derived from the hour of day, so the widget works in
//! unconfigured development environments.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::WeatherConfig;
use crate::error::AppError;

/// How long a fetched report stays fresh.
const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Weather payload returned to the widget.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    /// Provider icon code (e.g. `04d`).
    pub icon: String,
    /// Relative humidity in percent.
    pub humidity: i64,
    /// Wind speed in km/h.
    pub wind_kph: f64,
    pub city: String,
}

// Provider response, OpenWeatherMap current-weather shape.

#[derive(Deserialize)]
struct OwmResponse {
    main: OwmMain,
    weather: Vec<OwmCondition>,
    wind: OwmWind,
    name: String,
}

#[derive(Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: i64,
}

#[derive(Deserialize)]
struct OwmCondition {
    description: String,
    icon: String,
}

#[derive(Deserialize)]
struct OwmWind {
    /// Metres per second.
    speed: f64,
}

/// Convert a provider wind speed (m/s) to whole km/h.
fn wind_to_kph(metres_per_second: f64) -> f64 {
    (metres_per_second * 3.6).round()
}

struct CacheEntry {
    report: WeatherReport,
    fetched_at: tokio::time::Instant,
}

/// Cache key: coordinates rounded to two decimals (roughly 1 km),
/// so tiny geolocation jitter still hits the cache.
fn cache_key(lat: f64, lon: f64) -> (i64, i64) {
    ((lat * 100.0).round() as i64, (lon * 100.0).round() as i64)
}

/// Cached weather lookups against one provider.
pub struct WeatherService {
    config: WeatherConfig,
    client: reqwest::Client,
    cache: RwLock<HashMap<(i64, i64), CacheEntry>>,
}

impl WeatherService {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Coordinates used when the client supplies none.
    pub fn fallback_coords(&self) -> (f64, f64) {
        (self.config.fallback_lat, self.config.fallback_lon)
    }

    /// Current weather for the given coordinates, served from cache
    /// when fresh.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, AppError> {
        let key = cache_key(lat, lon);

        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(&key) {
                if entry.fetched_at.elapsed() < CACHE_TTL {
                    return Ok(entry.report.clone());
                }
            }
        }

        let report = self.fetch(lat, lon).await?;
        self.cache.write().await.insert(
            key,
            CacheEntry {
                report: report.clone(),
                fetched_at: tokio::time::Instant::now(),
            },
        );
        Ok(report)
    }

    /// Re-fetch the fallback location, replacing its cache entry.
    /// Called by the background refresh task.
    pub async fn refresh_fallback(&self) -> Result<(), AppError> {
        let (lat, lon) = self.fallback_coords();
        let report = self.fetch(lat, lon).await?;
        self.cache.write().await.insert(
            cache_key(lat, lon),
            CacheEntry {
                report,
                fetched_at: tokio::time::Instant::now(),
            },
        );
        Ok(())
    }

    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherReport, AppError> {
        let Some(api_key) = &self.config.api_key else {
            return Ok(demo_report(Local::now().hour()));
        };

        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("weather provider unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "weather provider returned {status}"
            )));
        }

        let payload: OwmResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("malformed weather response: {e}")))?;

        let condition = payload.weather.first().ok_or_else(|| {
            AppError::Upstream("weather response missing conditions".to_string())
        })?;

        Ok(WeatherReport {
            temperature: payload.main.temp,
            feels_like: payload.main.feels_like,
            description: condition.description.clone(),
            icon: condition.icon.clone(),
            humidity: payload.main.humidity,
            wind_kph: wind_to_kph(payload.wind.speed),
            city: payload.name,
        })
    }
}

/// Fabricate a believable report from the hour of day, used when no
/// provider key is configured.
fn demo_report(hour: u32) -> WeatherReport {
    let (temperature, description, icon) = match hour {
        6..=11 => (14.0, "scattered clouds", "03d"),
        12..=17 => (19.0, "clear sky", "01d"),
        18..=21 => (15.0, "few clouds", "02n"),
        _ => (9.0, "overcast clouds", "04n"),
    };

    WeatherReport {
        temperature,
        feels_like: temperature - 1.0,
        description: description.to_string(),
        icon: icon.to_string(),
        humidity: 65,
        wind_kph: wind_to_kph(3.2),
        city: "Demo City".to_string(),
    }
}
