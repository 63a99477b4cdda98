//! Whiteboard drawings. Soft-deleted rather than removed.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{EntityId, Timestamp};

/// A saved whiteboard canvas owned by a user.
///
/// `records` is an opaque snapshot produced by the drawing canvas; the
/// store never looks inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawing {
    pub id: EntityId,
    pub user_id: EntityId,
    pub name: String,
    pub records: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Soft-delete flag. Deleted drawings are kept in storage but excluded
    /// from listings.
    pub deleted: bool,
}

/// DTO for saving a new drawing.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDrawing {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub records: serde_json::Value,
}
