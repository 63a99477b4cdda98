//! The [`EntityStore`] capability trait.
//!
//! Callers hold an `Arc<dyn EntityStore>` chosen once at startup and are
//! unaware of which backing implementation is active. Every method that
//! mutates (or reads private data) takes the acting user so both
//! implementations can enforce the owner-uid rule identically.

use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use taskdeck_core::entities::{
    CreateDrawing, CreateNote, CreateProject, CreateTask, CreateTaskNote, Drawing, NewProjectFile,
    NewUser, Note, Project, ProjectFile, Summary, Task, TaskNote, TaskStatus, UpdateProject,
    UpdateTask, User,
};
use taskdeck_core::types::EntityId;

use crate::error::StoreError;

/// Uniform CRUD interface over the entity records, regardless of backend.
///
/// Reads that take `actor: Option<EntityId>` serve both the authenticated
/// UI (actor present, must own the project) and the public share view
/// (actor absent, project must be public).
#[async_trait]
pub trait EntityStore: Send + Sync {
    // -- users --------------------------------------------------------------

    /// Create a user at signup. Fails with a conflict if the email is taken.
    async fn create_user(&self, input: NewUser) -> Result<User, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_user(&self, uid: EntityId) -> Result<Option<User>, StoreError>;

    // -- projects -----------------------------------------------------------

    async fn create_project(
        &self,
        owner: EntityId,
        input: CreateProject,
    ) -> Result<Project, StoreError>;
    async fn list_projects(&self, owner: EntityId) -> Result<Vec<Project>, StoreError>;
    async fn get_project(
        &self,
        actor: Option<EntityId>,
        id: EntityId,
    ) -> Result<Project, StoreError>;
    async fn update_project(
        &self,
        actor: EntityId,
        id: EntityId,
        input: UpdateProject,
    ) -> Result<Project, StoreError>;
    /// Delete a project and cascade to its tasks (and their notes), notes,
    /// and files. Returns the deleted file records so the caller can remove
    /// the underlying blobs.
    async fn delete_project(
        &self,
        actor: EntityId,
        id: EntityId,
    ) -> Result<Vec<ProjectFile>, StoreError>;
    /// Assign a share id (if none yet) and mark the project public.
    async fn enable_sharing(&self, actor: EntityId, id: EntityId) -> Result<Project, StoreError>;
    /// Look up a project by share id. Only public projects are visible.
    async fn find_project_by_share_id(&self, share_id: &str) -> Result<Project, StoreError>;

    // -- tasks --------------------------------------------------------------

    async fn create_task(&self, actor: EntityId, input: CreateTask) -> Result<Task, StoreError>;
    async fn list_tasks(
        &self,
        actor: Option<EntityId>,
        project_id: EntityId,
    ) -> Result<Vec<Task>, StoreError>;
    /// All tasks across every project the owner has. Feeds the backlog
    /// summary.
    async fn list_tasks_for_owner(&self, owner: EntityId) -> Result<Vec<Task>, StoreError>;
    async fn update_task(
        &self,
        actor: EntityId,
        id: EntityId,
        input: UpdateTask,
    ) -> Result<Task, StoreError>;
    async fn set_task_status(
        &self,
        actor: EntityId,
        id: EntityId,
        status: TaskStatus,
    ) -> Result<Task, StoreError>;
    /// Delete a task and its task-notes.
    async fn delete_task(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError>;

    // -- project notes ------------------------------------------------------

    async fn create_note(&self, actor: EntityId, input: CreateNote) -> Result<Note, StoreError>;
    /// Notes for a project, newest first.
    async fn list_notes(
        &self,
        actor: Option<EntityId>,
        project_id: EntityId,
    ) -> Result<Vec<Note>, StoreError>;
    async fn update_note(
        &self,
        actor: EntityId,
        id: EntityId,
        content: String,
    ) -> Result<Note, StoreError>;
    async fn delete_note(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError>;

    // -- task notes ---------------------------------------------------------

    async fn create_task_note(
        &self,
        actor: EntityId,
        input: CreateTaskNote,
    ) -> Result<TaskNote, StoreError>;
    /// Notes for a task, newest first.
    async fn list_task_notes(
        &self,
        actor: Option<EntityId>,
        task_id: EntityId,
    ) -> Result<Vec<TaskNote>, StoreError>;
    async fn delete_task_note(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError>;

    // -- files --------------------------------------------------------------

    async fn create_file(
        &self,
        actor: EntityId,
        input: NewProjectFile,
    ) -> Result<ProjectFile, StoreError>;
    /// File metadata for a project, newest first.
    async fn list_files(
        &self,
        actor: Option<EntityId>,
        project_id: EntityId,
    ) -> Result<Vec<ProjectFile>, StoreError>;
    /// Remove file metadata, returning the record so the caller can delete
    /// the blob.
    async fn delete_file(&self, actor: EntityId, id: EntityId) -> Result<ProjectFile, StoreError>;

    // -- drawings -----------------------------------------------------------

    async fn create_drawing(
        &self,
        actor: EntityId,
        input: CreateDrawing,
    ) -> Result<Drawing, StoreError>;
    /// Drawings owned by the actor, excluding soft-deleted ones.
    async fn list_drawings(&self, actor: EntityId) -> Result<Vec<Drawing>, StoreError>;
    async fn get_drawing(&self, actor: EntityId, id: EntityId) -> Result<Drawing, StoreError>;
    /// Replace the canvas snapshot and bump `updated_at`.
    async fn update_drawing(
        &self,
        actor: EntityId,
        id: EntityId,
        records: Value,
    ) -> Result<Drawing, StoreError>;
    /// Soft-delete: sets the flag, the record stays in storage.
    async fn delete_drawing(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError>;

    // -- summaries ----------------------------------------------------------

    /// Overwrite the user's single summary record.
    async fn upsert_summary(&self, uid: EntityId, text: String) -> Result<Summary, StoreError>;
    async fn get_summary(&self, uid: EntityId) -> Result<Option<Summary>, StoreError>;
}

/// Generate a fresh share id: an opaque, non-sequential token derived from
/// random bytes. Independent of the project's primary id.
pub fn new_share_id() -> String {
    let digest = Sha256::digest(Uuid::new_v4().as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex[..20].to_string()
}
