use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskdeck_ai::{GenerativeClient, ServiceAccountKey, TokenProvider};
use taskdeck_api::auth::events::AuthEventBus;
use taskdeck_api::config::{GenerativeConfig, ServerConfig, StoreBackend};
use taskdeck_api::state::AppState;
use taskdeck_api::weather::WeatherService;
use taskdeck_api::{background, routes};
use taskdeck_store::{BlobStore, EntityStore, MemoryBlobStore, MemoryStore, PgStore, S3BlobStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, backend = ?config.store_backend, "Loaded server configuration");

    // --- Storage backends (chosen once; handlers only see the traits) ---
    let (store, blobs): (Arc<dyn EntityStore>, Arc<dyn BlobStore>) = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

            let pool = taskdeck_store::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            taskdeck_store::health_check(&pool)
                .await
                .expect("Database health check failed");
            taskdeck_store::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            let bucket = std::env::var("S3_BUCKET").expect("S3_BUCKET must be set");
            let public_base_url =
                std::env::var("S3_PUBLIC_BASE_URL").expect("S3_PUBLIC_BASE_URL must be set");
            let s3 = S3BlobStore::from_env(bucket, public_base_url).await;
            tracing::info!("S3 blob store initialized");

            (Arc::new(PgStore::new(pool)), Arc::new(s3))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory storage; all data is lost on shutdown");
            (
                Arc::new(MemoryStore::new()),
                Arc::new(MemoryBlobStore::default()),
            )
        }
    };

    // --- Generative provider ---
    let generative = build_generative_client(&config.generative);
    if generative.is_none() {
        tracing::info!("No generative endpoint configured; /ai/summary will answer 500");
    }

    // --- Weather ---
    let weather = Arc::new(WeatherService::new(config.weather.clone()));
    let weather_cancel = tokio_util::sync::CancellationToken::new();
    let weather_handle = tokio::spawn(background::weather_refresh::run(
        Arc::clone(&weather),
        weather_cancel.clone(),
    ));

    // --- Auth events ---
    let auth_events = Arc::new(AuthEventBus::default());
    let auth_log_handle = tokio::spawn(background::auth_log::run(auth_events.subscribe()));

    // --- CORS ---
    let cors = build_cors_layer(&config);

    // --- App state ---
    let state = AppState {
        store,
        blobs,
        config: Arc::new(config.clone()),
        auth_events: Arc::clone(&auth_events),
        generative,
        weather,
    };

    // --- Request ID header name ---
    let request_id_header = HeaderName::from_static("x-request-id");

    // --- Router ---
    let app = Router::new()
        // Health check at root level (not under /api/v1).
        .merge(routes::health::router())
        // API v1 routes.
        .nest("/api/v1", routes::api_routes())
        // -- Middleware stack (applied bottom-up) --
        // Panic recovery: catch panics and return 500 JSON.
        .layer(CatchPanicLayer::new())
        // Request timeout.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        // Propagate request ID to response.
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        // Structured request/response tracing.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Set request ID on incoming requests.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        // CORS.
        .layer(cors)
        // Shared state.
        .with_state(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    weather_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), weather_handle).await;
    tracing::info!("Weather refresh stopped");

    // Dropping the bus closes the broadcast channel and ends the logger.
    drop(auth_events);
    let _ = tokio::time::timeout(Duration::from_secs(5), auth_log_handle).await;

    tracing::info!("Graceful shutdown complete");
}

/// Build the generative client from configuration, if an endpoint is
/// set. A service-account key takes precedence over a static API key.
fn build_generative_client(config: &GenerativeConfig) -> Option<Arc<GenerativeClient>> {
    let api_url = config.api_url.clone()?;

    let client = if let Some(raw_key) = &config.service_account_json {
        let key = ServiceAccountKey::from_json(raw_key)
            .expect("GENAI_SERVICE_ACCOUNT_JSON is not a valid service-account key");
        let tokens = TokenProvider::new(key, config.oauth_scope.clone())
            .expect("Service-account private key is invalid");
        GenerativeClient::with_tokens(api_url, config.default_model.clone(), tokens)
    } else if let Some(api_key) = &config.api_key {
        GenerativeClient::with_api_key(api_url, config.default_model.clone(), api_key.clone())
    } else {
        GenerativeClient::new(api_url, config.default_model.clone())
    };

    Some(Arc::new(client))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Build the CORS middleware layer from server configuration.
///
/// Panics at startup if any configured origin is invalid; we want
/// misconfiguration to fail fast.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
