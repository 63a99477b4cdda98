//! User entity.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{EntityId, Timestamp};

/// An account holder. Immutable after signup except for `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub uid: EntityId,
    pub name: String,
    pub email: String,
    /// Argon2 password hash. Never serialized in API responses.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// Input for user creation. The password is hashed before this is built.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    pub password_hash: String,
}
