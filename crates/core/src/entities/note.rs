//! Project-level and task-level free-form notes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{EntityId, Timestamp};

/// A free-form annotation attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: EntityId,
    pub project_id: EntityId,
    pub content: String,
    pub created_at: Timestamp,
}

/// A free-form annotation attached to a single task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskNote {
    pub id: EntityId,
    pub task_id: EntityId,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for creating a project note.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNote {
    pub project_id: EntityId,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

/// DTO for creating a task note.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskNote {
    pub task_id: EntityId,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}
