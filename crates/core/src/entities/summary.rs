//! Per-user backlog summary. One record per user, overwritten on each
//! regeneration.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub uid: EntityId,
    pub summary: String,
    pub updated_at: Timestamp,
}
