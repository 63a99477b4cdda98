//! Structured logging subscriber for the auth event bus.
//!
//! The server attaches this at startup; further subscribers (session
//! analytics, audit sinks) register on the same bus without the auth
//! handlers changing.

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;

use crate::auth::events::AuthEvent;

/// Consume auth events and emit one log line per transition. Exits
/// when the bus is dropped.
pub async fn run(mut events: Receiver<AuthEvent>) {
    loop {
        match events.recv().await {
            Ok(AuthEvent::SignedUp { uid, email }) => {
                tracing::info!(%uid, %email, "user signed up");
            }
            Ok(AuthEvent::LoggedIn { uid }) => {
                tracing::info!(%uid, "user logged in");
            }
            Ok(AuthEvent::LoggedOut { uid }) => {
                tracing::info!(%uid, "user logged out");
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "auth event logger lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
