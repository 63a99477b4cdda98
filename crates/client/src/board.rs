//! Kanban board cache with optimistic status mutation.
//!
//! Moving a card applies the new status to the local cache immediately,
//! then persists it in the background. Each move is an explicit
//! [`StatusMutation`] command that captures the pre-move status, so a
//! failed persist can restore exactly the state the move started from.
//!
//! Overlapping moves of the same task are not serialized; whichever
//! persist response lands last determines the cache state.

use std::collections::HashMap;

use async_trait::async_trait;

use taskdeck_core::entities::{Task, TaskStatus};
use taskdeck_core::types::EntityId;

use crate::http::{ApiClient, ClientError};

/// Lifecycle of a status mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    /// Applied locally, persist outcome unknown.
    Pending,
    /// The backend accepted the new status.
    Confirmed,
    /// The persist failed and the cache was restored.
    RolledBack,
}

/// One optimistic status change, from creation to resolution.
#[derive(Debug, Clone)]
pub struct StatusMutation {
    pub task_id: EntityId,
    /// Status the task had when the move began.
    pub from: TaskStatus,
    pub to: TaskStatus,
    pub state: MutationState,
}

/// Backend used to persist a status change.
#[async_trait]
pub trait TaskPersist: Send + Sync {
    async fn persist_status(&self, task_id: EntityId, to: TaskStatus)
        -> Result<Task, ClientError>;
}

#[async_trait]
impl TaskPersist for ApiClient {
    async fn persist_status(
        &self,
        task_id: EntityId,
        to: TaskStatus,
    ) -> Result<Task, ClientError> {
        self.set_task_status(task_id, to).await
    }
}

/// Local cache of the tasks currently displayed on the board.
#[derive(Debug, Default)]
pub struct BoardCache {
    tasks: HashMap<EntityId, Task>,
}

impl BoardCache {
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: tasks.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    pub fn task(&self, id: EntityId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Tasks in one column, oldest first.
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .values()
            .filter(|t| t.status == status)
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        tasks
    }

    /// Start an optimistic move: capture the current status, apply the
    /// target status to the cache, and return the pending command.
    ///
    /// Returns `None` when the task is unknown or already has the
    /// target status; callers must not issue a persist in that case.
    pub fn begin_move(&mut self, task_id: EntityId, to: TaskStatus) -> Option<StatusMutation> {
        let task = self.tasks.get_mut(&task_id)?;
        let from = task.status;
        if from == to {
            return None;
        }
        task.status = to;
        Some(StatusMutation {
            task_id,
            from,
            to,
            state: MutationState::Pending,
        })
    }

    /// Mark a mutation confirmed, adopting the server's copy of the task.
    pub fn confirm(&mut self, mutation: &mut StatusMutation, persisted: Task) {
        self.tasks.insert(persisted.id, persisted);
        mutation.state = MutationState::Confirmed;
    }

    /// Restore the status captured when the move began. Idempotent:
    /// rolling back an already rolled-back mutation changes nothing.
    pub fn roll_back(&mut self, mutation: &mut StatusMutation) {
        if mutation.state == MutationState::RolledBack {
            return;
        }
        if let Some(task) = self.tasks.get_mut(&mutation.task_id) {
            task.status = mutation.from;
        }
        mutation.state = MutationState::RolledBack;
    }
}

/// Drive one optimistic move to completion.
///
/// Applies the move to the cache, persists it, and resolves the command:
/// confirmed on success, rolled back (with the error returned) on
/// failure. A no-op move resolves to `Ok(None)` without touching the
/// backend.
pub async fn move_task(
    cache: &mut BoardCache,
    persist: &impl TaskPersist,
    task_id: EntityId,
    to: TaskStatus,
) -> Result<Option<StatusMutation>, ClientError> {
    let Some(mut mutation) = cache.begin_move(task_id, to) else {
        return Ok(None);
    };

    match persist.persist_status(task_id, to).await {
        Ok(task) => {
            cache.confirm(&mut mutation, task);
            Ok(Some(mutation))
        }
        Err(err) => {
            cache.roll_back(&mut mutation);
            tracing::warn!(%task_id, error = %err, "status change rejected, restored previous state");
            Err(err)
        }
    }
}
