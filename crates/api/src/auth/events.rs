//! Broadcast bus for authentication state changes.
//!
//! Interested parties register by calling [`AuthEventBus::subscribe`]
//! and receive every subsequent transition; nothing in the auth
//! handlers knows who is listening. The server itself attaches a
//! logging subscriber at startup.

use serde::Serialize;
use tokio::sync::broadcast;

use taskdeck_core::types::EntityId;

/// Buffered events per subscriber before lagging kicks in.
const CHANNEL_CAPACITY: usize = 64;

/// An authentication state transition.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthEvent {
    SignedUp { uid: EntityId, email: String },
    LoggedIn { uid: EntityId },
    LoggedOut { uid: EntityId },
}

/// Fan-out channel for [`AuthEvent`]s.
pub struct AuthEventBus {
    sender: broadcast::Sender<AuthEvent>,
}

impl Default for AuthEventBus {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }
}

impl AuthEventBus {
    /// Publish an event to all current subscribers.
    ///
    /// A send with no subscribers is not an error; the event is simply
    /// dropped.
    pub fn publish(&self, event: AuthEvent) {
        let _ = self.sender.send(event);
    }

    /// Register a new subscriber. Only events published after this
    /// call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sender.subscribe()
    }
}
