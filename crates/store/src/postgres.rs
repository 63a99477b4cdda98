//! PostgreSQL implementation of [`EntityStore`].
//!
//! Owner-uid checks happen here, before the per-entity repositories run
//! their SQL, so the trait's permission semantics match [`MemoryStore`]
//! (the checks the hosted backend would enforce server-side). The project
//! cascade runs inside a single transaction: the delete is all-or-nothing.

use async_trait::async_trait;
use serde_json::Value;

use taskdeck_core::entities::{
    CreateDrawing, CreateNote, CreateProject, CreateTask, CreateTaskNote, Drawing, NewProjectFile,
    NewUser, Note, Project, ProjectFile, Summary, Task, TaskNote, TaskStatus, UpdateProject,
    UpdateTask, User,
};
use taskdeck_core::error::CoreError;
use taskdeck_core::types::EntityId;

use crate::error::StoreError;
use crate::repositories::{
    DrawingRepo, FileRepo, NoteRepo, ProjectRepo, SummaryRepo, TaskNoteRepo, TaskRepo, UserRepo,
};
use crate::store::{new_share_id, EntityStore};
use crate::DbPool;

/// Entity store backed by PostgreSQL.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Fetch a project and require that the actor owns it.
    async fn owned_project(
        &self,
        actor: EntityId,
        id: EntityId,
    ) -> Result<Project, StoreError> {
        let project = ProjectRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Project", id))?;
        if project.owner_uid != actor {
            return Err(StoreError::permission_denied());
        }
        Ok(project)
    }

    /// Fetch a project for reading: owner always, anyone when public.
    async fn readable_project(
        &self,
        actor: Option<EntityId>,
        id: EntityId,
    ) -> Result<Project, StoreError> {
        let project = ProjectRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Project", id))?;
        if project.is_public || actor == Some(project.owner_uid) {
            Ok(project)
        } else {
            Err(StoreError::permission_denied())
        }
    }

    /// Fetch a task and require that the actor owns its project.
    async fn owned_task(&self, actor: EntityId, id: EntityId) -> Result<Task, StoreError> {
        let task = TaskRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Task", id))?;
        self.owned_project(actor, task.project_id).await?;
        Ok(task)
    }

    /// Fetch a drawing and require that the actor owns it.
    async fn owned_drawing(&self, actor: EntityId, id: EntityId) -> Result<Drawing, StoreError> {
        let drawing = DrawingRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Drawing", id))?;
        if drawing.user_id != actor {
            return Err(StoreError::permission_denied());
        }
        Ok(drawing)
    }
}

#[async_trait]
impl EntityStore for PgStore {
    // -- users --------------------------------------------------------------

    async fn create_user(&self, input: NewUser) -> Result<User, StoreError> {
        if UserRepo::find_by_email(&self.pool, &input.email)
            .await?
            .is_some()
        {
            return Err(CoreError::Conflict("Email already in use".into()).into());
        }
        Ok(UserRepo::create(&self.pool, &input).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn find_user(&self, uid: EntityId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, uid).await?)
    }

    // -- projects -----------------------------------------------------------

    async fn create_project(
        &self,
        owner: EntityId,
        input: CreateProject,
    ) -> Result<Project, StoreError> {
        Ok(ProjectRepo::create(&self.pool, owner, &input).await?)
    }

    async fn list_projects(&self, owner: EntityId) -> Result<Vec<Project>, StoreError> {
        Ok(ProjectRepo::list_for_owner(&self.pool, owner).await?)
    }

    async fn get_project(
        &self,
        actor: Option<EntityId>,
        id: EntityId,
    ) -> Result<Project, StoreError> {
        self.readable_project(actor, id).await
    }

    async fn update_project(
        &self,
        actor: EntityId,
        id: EntityId,
        input: UpdateProject,
    ) -> Result<Project, StoreError> {
        self.owned_project(actor, id).await?;
        ProjectRepo::update(&self.pool, id, &input)
            .await?
            .ok_or_else(|| StoreError::not_found("Project", id))
    }

    async fn delete_project(
        &self,
        actor: EntityId,
        id: EntityId,
    ) -> Result<Vec<ProjectFile>, StoreError> {
        self.owned_project(actor, id).await?;

        // All-or-nothing: collect file metadata and drop the project row in
        // one transaction; children go with it via the FK cascades.
        let mut tx = self.pool.begin().await?;
        let files = FileRepo::list_by_project(&mut *tx, id).await?;
        ProjectRepo::delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!(project_id = %id, file_count = files.len(), "Project deleted");
        Ok(files)
    }

    async fn enable_sharing(&self, actor: EntityId, id: EntityId) -> Result<Project, StoreError> {
        self.owned_project(actor, id).await?;
        ProjectRepo::set_sharing(&self.pool, id, &new_share_id())
            .await?
            .ok_or_else(|| StoreError::not_found("Project", id))
    }

    async fn find_project_by_share_id(&self, share_id: &str) -> Result<Project, StoreError> {
        ProjectRepo::find_public_by_share_id(&self.pool, share_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Project", share_id))
    }

    // -- tasks --------------------------------------------------------------

    async fn create_task(&self, actor: EntityId, input: CreateTask) -> Result<Task, StoreError> {
        self.owned_project(actor, input.project_id).await?;
        Ok(TaskRepo::create(&self.pool, &input).await?)
    }

    async fn list_tasks(
        &self,
        actor: Option<EntityId>,
        project_id: EntityId,
    ) -> Result<Vec<Task>, StoreError> {
        self.readable_project(actor, project_id).await?;
        Ok(TaskRepo::list_by_project(&self.pool, project_id).await?)
    }

    async fn list_tasks_for_owner(&self, owner: EntityId) -> Result<Vec<Task>, StoreError> {
        Ok(TaskRepo::list_for_owner(&self.pool, owner).await?)
    }

    async fn update_task(
        &self,
        actor: EntityId,
        id: EntityId,
        input: UpdateTask,
    ) -> Result<Task, StoreError> {
        self.owned_task(actor, id).await?;
        TaskRepo::update(&self.pool, id, &input)
            .await?
            .ok_or_else(|| StoreError::not_found("Task", id))
    }

    async fn set_task_status(
        &self,
        actor: EntityId,
        id: EntityId,
        status: TaskStatus,
    ) -> Result<Task, StoreError> {
        self.owned_task(actor, id).await?;
        TaskRepo::set_status(&self.pool, id, status)
            .await?
            .ok_or_else(|| StoreError::not_found("Task", id))
    }

    async fn delete_task(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError> {
        self.owned_task(actor, id).await?;
        TaskRepo::delete(&self.pool, id).await?;
        Ok(())
    }

    // -- project notes ------------------------------------------------------

    async fn create_note(&self, actor: EntityId, input: CreateNote) -> Result<Note, StoreError> {
        self.owned_project(actor, input.project_id).await?;
        Ok(NoteRepo::create(&self.pool, &input).await?)
    }

    async fn list_notes(
        &self,
        actor: Option<EntityId>,
        project_id: EntityId,
    ) -> Result<Vec<Note>, StoreError> {
        self.readable_project(actor, project_id).await?;
        Ok(NoteRepo::list_by_project(&self.pool, project_id).await?)
    }

    async fn update_note(
        &self,
        actor: EntityId,
        id: EntityId,
        content: String,
    ) -> Result<Note, StoreError> {
        let note = NoteRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Note", id))?;
        self.owned_project(actor, note.project_id).await?;
        NoteRepo::update_content(&self.pool, id, &content)
            .await?
            .ok_or_else(|| StoreError::not_found("Note", id))
    }

    async fn delete_note(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError> {
        let note = NoteRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Note", id))?;
        self.owned_project(actor, note.project_id).await?;
        NoteRepo::delete(&self.pool, id).await?;
        Ok(())
    }

    // -- task notes ---------------------------------------------------------

    async fn create_task_note(
        &self,
        actor: EntityId,
        input: CreateTaskNote,
    ) -> Result<TaskNote, StoreError> {
        self.owned_task(actor, input.task_id).await?;
        Ok(TaskNoteRepo::create(&self.pool, &input).await?)
    }

    async fn list_task_notes(
        &self,
        actor: Option<EntityId>,
        task_id: EntityId,
    ) -> Result<Vec<TaskNote>, StoreError> {
        let task = TaskRepo::find_by_id(&self.pool, task_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Task", task_id))?;
        self.readable_project(actor, task.project_id).await?;
        Ok(TaskNoteRepo::list_by_task(&self.pool, task_id).await?)
    }

    async fn delete_task_note(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError> {
        let note = TaskNoteRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("TaskNote", id))?;
        self.owned_task(actor, note.task_id).await?;
        TaskNoteRepo::delete(&self.pool, id).await?;
        Ok(())
    }

    // -- files --------------------------------------------------------------

    async fn create_file(
        &self,
        actor: EntityId,
        input: NewProjectFile,
    ) -> Result<ProjectFile, StoreError> {
        self.owned_project(actor, input.project_id).await?;
        Ok(FileRepo::create(&self.pool, &input).await?)
    }

    async fn list_files(
        &self,
        actor: Option<EntityId>,
        project_id: EntityId,
    ) -> Result<Vec<ProjectFile>, StoreError> {
        self.readable_project(actor, project_id).await?;
        Ok(FileRepo::list_by_project(&self.pool, project_id).await?)
    }

    async fn delete_file(&self, actor: EntityId, id: EntityId) -> Result<ProjectFile, StoreError> {
        let file = FileRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("ProjectFile", id))?;
        self.owned_project(actor, file.project_id).await?;
        FileRepo::delete(&self.pool, id).await?;
        Ok(file)
    }

    // -- drawings -----------------------------------------------------------

    async fn create_drawing(
        &self,
        actor: EntityId,
        input: CreateDrawing,
    ) -> Result<Drawing, StoreError> {
        Ok(DrawingRepo::create(&self.pool, actor, &input).await?)
    }

    async fn list_drawings(&self, actor: EntityId) -> Result<Vec<Drawing>, StoreError> {
        Ok(DrawingRepo::list_for_user(&self.pool, actor).await?)
    }

    async fn get_drawing(&self, actor: EntityId, id: EntityId) -> Result<Drawing, StoreError> {
        self.owned_drawing(actor, id).await
    }

    async fn update_drawing(
        &self,
        actor: EntityId,
        id: EntityId,
        records: Value,
    ) -> Result<Drawing, StoreError> {
        self.owned_drawing(actor, id).await?;
        DrawingRepo::update_records(&self.pool, id, &records)
            .await?
            .ok_or_else(|| StoreError::not_found("Drawing", id))
    }

    async fn delete_drawing(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError> {
        self.owned_drawing(actor, id).await?;
        DrawingRepo::soft_delete(&self.pool, id).await?;
        Ok(())
    }

    // -- summaries ----------------------------------------------------------

    async fn upsert_summary(&self, uid: EntityId, text: String) -> Result<Summary, StoreError> {
        Ok(SummaryRepo::upsert(&self.pool, uid, &text).await?)
    }

    async fn get_summary(&self, uid: EntityId) -> Result<Option<Summary>, StoreError> {
        Ok(SummaryRepo::find_by_uid(&self.pool, uid).await?)
    }
}
