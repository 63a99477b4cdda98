use std::sync::Arc;

use taskdeck_ai::GenerativeClient;
use taskdeck_store::{BlobStore, EntityStore};

use crate::auth::events::AuthEventBus;
use crate::config::ServerConfig;
use crate::weather::WeatherService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The store
/// and blob backends are fixed at startup; handlers only see the trait
/// objects.
#[derive(Clone)]
pub struct AppState {
    /// Entity persistence (Postgres or in-memory).
    pub store: Arc<dyn EntityStore>,
    /// Blob persistence for uploaded files (S3 or in-memory).
    pub blobs: Arc<dyn BlobStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Fan-out channel for auth state transitions.
    pub auth_events: Arc<AuthEventBus>,
    /// Generative provider client; `None` when no endpoint is configured.
    pub generative: Option<Arc<GenerativeClient>>,
    /// Cached weather lookups.
    pub weather: Arc<WeatherService>,
}
