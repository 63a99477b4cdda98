//! In-memory mock implementation of [`EntityStore`].
//!
//! Enforces the same owner-uid checks the real backend enforces
//! server-side, so authorized and unauthorized access behave identically
//! in both modes. All maps sit behind a single `RwLock`, so a project
//! cascade is observably atomic to every other call.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use taskdeck_core::entities::{
    CreateDrawing, CreateNote, CreateProject, CreateTask, CreateTaskNote, Drawing, NewProjectFile,
    NewUser, Note, Project, ProjectFile, Summary, Task, TaskNote, TaskStatus, UpdateProject,
    UpdateTask, User,
};
use taskdeck_core::error::CoreError;
use taskdeck_core::types::EntityId;

use crate::error::StoreError;
use crate::store::{new_share_id, EntityStore};

#[derive(Default)]
struct Inner {
    users: HashMap<EntityId, User>,
    projects: HashMap<EntityId, Project>,
    tasks: HashMap<EntityId, Task>,
    notes: HashMap<EntityId, Note>,
    task_notes: HashMap<EntityId, TaskNote>,
    files: HashMap<EntityId, ProjectFile>,
    drawings: HashMap<EntityId, Drawing>,
    summaries: HashMap<EntityId, Summary>,
}

impl Inner {
    /// Resolve a project and require that the actor owns it.
    fn owned_project(&self, actor: EntityId, id: EntityId) -> Result<&Project, StoreError> {
        let project = self
            .projects
            .get(&id)
            .ok_or_else(|| StoreError::not_found("Project", id))?;
        if project.owner_uid != actor {
            return Err(StoreError::permission_denied());
        }
        Ok(project)
    }

    /// Resolve a project for reading: owner always, anyone when public.
    fn readable_project(
        &self,
        actor: Option<EntityId>,
        id: EntityId,
    ) -> Result<&Project, StoreError> {
        let project = self
            .projects
            .get(&id)
            .ok_or_else(|| StoreError::not_found("Project", id))?;
        if project.is_public || actor == Some(project.owner_uid) {
            Ok(project)
        } else {
            Err(StoreError::permission_denied())
        }
    }

    /// Resolve a task and require that the actor owns its project.
    fn owned_task(&self, actor: EntityId, id: EntityId) -> Result<&Task, StoreError> {
        let task = self
            .tasks
            .get(&id)
            .ok_or_else(|| StoreError::not_found("Task", id))?;
        self.owned_project(actor, task.project_id)?;
        Ok(task)
    }
}

/// Local mock of the external entity store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    // -- users --------------------------------------------------------------

    async fn create_user(&self, input: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == input.email) {
            return Err(CoreError::Conflict("Email already in use".into()).into());
        }
        let user = User {
            uid: EntityId::new_v4(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        };
        inner.users.insert(user.uid, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user(&self, uid: EntityId) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&uid).cloned())
    }

    // -- projects -----------------------------------------------------------

    async fn create_project(
        &self,
        owner: EntityId,
        input: CreateProject,
    ) -> Result<Project, StoreError> {
        let mut inner = self.inner.write().await;
        let project = Project {
            id: EntityId::new_v4(),
            name: input.name,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            owner_uid: owner,
            share_id: None,
            is_public: false,
            image_url: input.image_url,
            created_at: Utc::now(),
        };
        inner.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn list_projects(&self, owner: EntityId) -> Result<Vec<Project>, StoreError> {
        let inner = self.inner.read().await;
        let mut projects: Vec<Project> = inner
            .projects
            .values()
            .filter(|p| p.owner_uid == owner)
            .cloned()
            .collect();
        projects.sort_by_key(|p| p.created_at);
        Ok(projects)
    }

    async fn get_project(
        &self,
        actor: Option<EntityId>,
        id: EntityId,
    ) -> Result<Project, StoreError> {
        let inner = self.inner.read().await;
        inner.readable_project(actor, id).cloned()
    }

    async fn update_project(
        &self,
        actor: EntityId,
        id: EntityId,
        input: UpdateProject,
    ) -> Result<Project, StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_project(actor, id)?;
        let project = inner
            .projects
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Project", id))?;
        if let Some(name) = input.name {
            project.name = name;
        }
        if let Some(description) = input.description {
            project.description = description;
        }
        if let Some(start_date) = input.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = input.end_date {
            project.end_date = end_date;
        }
        if let Some(image_url) = input.image_url {
            project.image_url = Some(image_url);
        }
        Ok(project.clone())
    }

    async fn delete_project(
        &self,
        actor: EntityId,
        id: EntityId,
    ) -> Result<Vec<ProjectFile>, StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_project(actor, id)?;

        let task_ids: Vec<EntityId> = inner
            .tasks
            .values()
            .filter(|t| t.project_id == id)
            .map(|t| t.id)
            .collect();
        inner
            .task_notes
            .retain(|_, n| !task_ids.contains(&n.task_id));
        inner.tasks.retain(|_, t| t.project_id != id);
        inner.notes.retain(|_, n| n.project_id != id);

        let removed_files: Vec<ProjectFile> = inner
            .files
            .values()
            .filter(|f| f.project_id == id)
            .cloned()
            .collect();
        inner.files.retain(|_, f| f.project_id != id);

        inner.projects.remove(&id);
        Ok(removed_files)
    }

    async fn enable_sharing(&self, actor: EntityId, id: EntityId) -> Result<Project, StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_project(actor, id)?;
        let project = inner
            .projects
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Project", id))?;
        if project.share_id.is_none() {
            project.share_id = Some(new_share_id());
        }
        project.is_public = true;
        Ok(project.clone())
    }

    async fn find_project_by_share_id(&self, share_id: &str) -> Result<Project, StoreError> {
        let inner = self.inner.read().await;
        inner
            .projects
            .values()
            .find(|p| p.is_public && p.share_id.as_deref() == Some(share_id))
            .cloned()
            .ok_or_else(|| StoreError::not_found("Project", share_id))
    }

    // -- tasks --------------------------------------------------------------

    async fn create_task(&self, actor: EntityId, input: CreateTask) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_project(actor, input.project_id)?;
        let task = Task {
            id: EntityId::new_v4(),
            project_id: input.project_id,
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or(TaskStatus::ToDo),
            created_at: Utc::now(),
        };
        inner.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_tasks(
        &self,
        actor: Option<EntityId>,
        project_id: EntityId,
    ) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.read().await;
        inner.readable_project(actor, project_id)?;
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }

    async fn list_tasks_for_owner(&self, owner: EntityId) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| {
                inner
                    .projects
                    .get(&t.project_id)
                    .is_some_and(|p| p.owner_uid == owner)
            })
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        Ok(tasks)
    }

    async fn update_task(
        &self,
        actor: EntityId,
        id: EntityId,
        input: UpdateTask,
    ) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_task(actor, id)?;
        let task = inner
            .tasks
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Task", id))?;
        if let Some(title) = input.title {
            task.title = title;
        }
        if let Some(description) = input.description {
            task.description = description;
        }
        if let Some(status) = input.status {
            task.status = status;
        }
        Ok(task.clone())
    }

    async fn set_task_status(
        &self,
        actor: EntityId,
        id: EntityId,
        status: TaskStatus,
    ) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_task(actor, id)?;
        let task = inner
            .tasks
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Task", id))?;
        task.status = status;
        Ok(task.clone())
    }

    async fn delete_task(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_task(actor, id)?;
        inner.task_notes.retain(|_, n| n.task_id != id);
        inner.tasks.remove(&id);
        Ok(())
    }

    // -- project notes ------------------------------------------------------

    async fn create_note(&self, actor: EntityId, input: CreateNote) -> Result<Note, StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_project(actor, input.project_id)?;
        let note = Note {
            id: EntityId::new_v4(),
            project_id: input.project_id,
            content: input.content,
            created_at: Utc::now(),
        };
        inner.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn list_notes(
        &self,
        actor: Option<EntityId>,
        project_id: EntityId,
    ) -> Result<Vec<Note>, StoreError> {
        let inner = self.inner.read().await;
        inner.readable_project(actor, project_id)?;
        let mut notes: Vec<Note> = inner
            .notes
            .values()
            .filter(|n| n.project_id == project_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn update_note(
        &self,
        actor: EntityId,
        id: EntityId,
        content: String,
    ) -> Result<Note, StoreError> {
        let mut inner = self.inner.write().await;
        let project_id = inner
            .notes
            .get(&id)
            .ok_or_else(|| StoreError::not_found("Note", id))?
            .project_id;
        inner.owned_project(actor, project_id)?;
        let note = inner
            .notes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Note", id))?;
        note.content = content;
        Ok(note.clone())
    }

    async fn delete_note(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let project_id = inner
            .notes
            .get(&id)
            .ok_or_else(|| StoreError::not_found("Note", id))?
            .project_id;
        inner.owned_project(actor, project_id)?;
        inner.notes.remove(&id);
        Ok(())
    }

    // -- task notes ---------------------------------------------------------

    async fn create_task_note(
        &self,
        actor: EntityId,
        input: CreateTaskNote,
    ) -> Result<TaskNote, StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_task(actor, input.task_id)?;
        let note = TaskNote {
            id: EntityId::new_v4(),
            task_id: input.task_id,
            content: input.content,
            created_at: Utc::now(),
        };
        inner.task_notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn list_task_notes(
        &self,
        actor: Option<EntityId>,
        task_id: EntityId,
    ) -> Result<Vec<TaskNote>, StoreError> {
        let inner = self.inner.read().await;
        let task = inner
            .tasks
            .get(&task_id)
            .ok_or_else(|| StoreError::not_found("Task", task_id))?;
        inner.readable_project(actor, task.project_id)?;
        let mut notes: Vec<TaskNote> = inner
            .task_notes
            .values()
            .filter(|n| n.task_id == task_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    async fn delete_task_note(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let task_id = inner
            .task_notes
            .get(&id)
            .ok_or_else(|| StoreError::not_found("TaskNote", id))?
            .task_id;
        inner.owned_task(actor, task_id)?;
        inner.task_notes.remove(&id);
        Ok(())
    }

    // -- files --------------------------------------------------------------

    async fn create_file(
        &self,
        actor: EntityId,
        input: NewProjectFile,
    ) -> Result<ProjectFile, StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned_project(actor, input.project_id)?;
        let file = ProjectFile {
            id: EntityId::new_v4(),
            project_id: input.project_id,
            name: input.name,
            content_type: input.content_type,
            size_bytes: input.size_bytes,
            url: input.url,
            storage_path: input.storage_path,
            uploaded_at: Utc::now(),
        };
        inner.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn list_files(
        &self,
        actor: Option<EntityId>,
        project_id: EntityId,
    ) -> Result<Vec<ProjectFile>, StoreError> {
        let inner = self.inner.read().await;
        inner.readable_project(actor, project_id)?;
        let mut files: Vec<ProjectFile> = inner
            .files
            .values()
            .filter(|f| f.project_id == project_id)
            .cloned()
            .collect();
        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(files)
    }

    async fn delete_file(&self, actor: EntityId, id: EntityId) -> Result<ProjectFile, StoreError> {
        let mut inner = self.inner.write().await;
        let project_id = inner
            .files
            .get(&id)
            .ok_or_else(|| StoreError::not_found("ProjectFile", id))?
            .project_id;
        inner.owned_project(actor, project_id)?;
        inner
            .files
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("ProjectFile", id))
    }

    // -- drawings -----------------------------------------------------------

    async fn create_drawing(
        &self,
        actor: EntityId,
        input: CreateDrawing,
    ) -> Result<Drawing, StoreError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let drawing = Drawing {
            id: EntityId::new_v4(),
            user_id: actor,
            name: input.name,
            records: input.records,
            created_at: now,
            updated_at: now,
            deleted: false,
        };
        inner.drawings.insert(drawing.id, drawing.clone());
        Ok(drawing)
    }

    async fn list_drawings(&self, actor: EntityId) -> Result<Vec<Drawing>, StoreError> {
        let inner = self.inner.read().await;
        let mut drawings: Vec<Drawing> = inner
            .drawings
            .values()
            .filter(|d| d.user_id == actor && !d.deleted)
            .cloned()
            .collect();
        drawings.sort_by_key(|d| d.created_at);
        Ok(drawings)
    }

    async fn get_drawing(&self, actor: EntityId, id: EntityId) -> Result<Drawing, StoreError> {
        let inner = self.inner.read().await;
        let drawing = inner
            .drawings
            .get(&id)
            .ok_or_else(|| StoreError::not_found("Drawing", id))?;
        if drawing.user_id != actor {
            return Err(StoreError::permission_denied());
        }
        Ok(drawing.clone())
    }

    async fn update_drawing(
        &self,
        actor: EntityId,
        id: EntityId,
        records: Value,
    ) -> Result<Drawing, StoreError> {
        let mut inner = self.inner.write().await;
        let drawing = inner
            .drawings
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Drawing", id))?;
        if drawing.user_id != actor {
            return Err(StoreError::permission_denied());
        }
        drawing.records = records;
        drawing.updated_at = Utc::now();
        Ok(drawing.clone())
    }

    async fn delete_drawing(&self, actor: EntityId, id: EntityId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let drawing = inner
            .drawings
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Drawing", id))?;
        if drawing.user_id != actor {
            return Err(StoreError::permission_denied());
        }
        drawing.deleted = true;
        Ok(())
    }

    // -- summaries ----------------------------------------------------------

    async fn upsert_summary(&self, uid: EntityId, text: String) -> Result<Summary, StoreError> {
        let mut inner = self.inner.write().await;
        let summary = Summary {
            uid,
            summary: text,
            updated_at: Utc::now(),
        };
        inner.summaries.insert(uid, summary.clone());
        Ok(summary)
    }

    async fn get_summary(&self, uid: EntityId) -> Result<Option<Summary>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.summaries.get(&uid).cloned())
    }
}
