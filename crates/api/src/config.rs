use crate::auth::jwt::JwtConfig;

/// Which persistence backend the server runs against.
///
/// Selected once at startup; handlers only ever see the trait objects
/// built from this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Postgres via sqlx, blobs in S3.
    Postgres,
    /// Everything in process memory. For development and tests.
    Memory,
}

/// Settings for the generative summary proxy.
///
/// The proxy needs an endpoint plus one credential: either a static
/// API key, or a service-account key that is exchanged for short-lived
/// bearer tokens. With neither set the proxy route answers 500.
#[derive(Debug, Clone, Default)]
pub struct GenerativeConfig {
    /// Provider endpoint URL. `None` disables the proxy.
    pub api_url: Option<String>,
    /// Model used when the request does not name one.
    pub default_model: String,
    /// Static API key credential.
    pub api_key: Option<String>,
    /// Raw service-account key JSON (alternative to `api_key`).
    pub service_account_json: Option<String>,
    /// OAuth scope requested during the token exchange.
    pub oauth_scope: String,
}

/// Settings for the weather widget endpoint.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Upstream provider URL (OpenWeatherMap-compatible).
    pub api_url: String,
    /// Provider API key. `None` switches the endpoint to demo data.
    pub api_key: Option<String>,
    /// Coordinates used when the client supplies none.
    pub fallback_lat: f64,
    pub fallback_lon: f64,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Persistence backend (default: `postgres`).
    pub store_backend: StoreBackend,
    /// Public origin used to build share links,
    /// e.g. `https://app.example.com`.
    pub share_base_url: String,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// Generative provider settings.
    pub generative: GenerativeConfig,
    /// Weather provider settings.
    pub weather: WeatherConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                             |
    /// |------------------------|-------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                           |
    /// | `PORT`                 | `3000`                              |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`             |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                |
    /// | `STORE_BACKEND`        | `postgres` (`memory` for dev/tests) |
    /// | `SHARE_BASE_URL`       | `http://localhost:5173`             |
    /// | `GENAI_API_URL`        | -- (unset disables the proxy)       |
    /// | `GENAI_MODEL`          | `gemini-2.0-flash`                  |
    /// | `GENAI_API_KEY`        | --                                  |
    /// | `GENAI_SERVICE_ACCOUNT_JSON` | --                            |
    /// | `GENAI_OAUTH_SCOPE`    | `https://www.googleapis.com/auth/cloud-platform` |
    /// | `WEATHER_API_URL`      | `https://api.openweathermap.org/data/2.5/weather` |
    /// | `WEATHER_API_KEY`      | -- (unset switches to demo data)    |
    /// | `WEATHER_FALLBACK_LAT` | `51.5074`                           |
    /// | `WEATHER_FALLBACK_LON` | `-0.1278`                           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let store_backend = match std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .as_str()
        {
            "postgres" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => panic!("STORE_BACKEND must be 'postgres' or 'memory', got '{other}'"),
        };

        let share_base_url = std::env::var("SHARE_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into());

        let generative = GenerativeConfig {
            api_url: std::env::var("GENAI_API_URL").ok(),
            default_model: std::env::var("GENAI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".into()),
            api_key: std::env::var("GENAI_API_KEY").ok(),
            service_account_json: std::env::var("GENAI_SERVICE_ACCOUNT_JSON").ok(),
            oauth_scope: std::env::var("GENAI_OAUTH_SCOPE")
                .unwrap_or_else(|_| "https://www.googleapis.com/auth/cloud-platform".into()),
        };

        let weather = WeatherConfig {
            api_url: std::env::var("WEATHER_API_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5/weather".into()),
            api_key: std::env::var("WEATHER_API_KEY").ok(),
            fallback_lat: std::env::var("WEATHER_FALLBACK_LAT")
                .unwrap_or_else(|_| "51.5074".into())
                .parse()
                .expect("WEATHER_FALLBACK_LAT must be a valid f64"),
            fallback_lon: std::env::var("WEATHER_FALLBACK_LON")
                .unwrap_or_else(|_| "-0.1278".into())
                .parse()
                .expect("WEATHER_FALLBACK_LON must be a valid f64"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_backend,
            share_base_url,
            jwt: JwtConfig::from_env(),
            generative,
            weather,
        }
    }
}
