//! Entity types and their create/update DTOs, one module per entity.

pub mod drawing;
pub mod file;
pub mod note;
pub mod project;
pub mod summary;
pub mod task;
pub mod user;

pub use drawing::{CreateDrawing, Drawing};
pub use file::{NewProjectFile, ProjectFile};
pub use note::{CreateNote, CreateTaskNote, Note, TaskNote};
pub use project::{CreateProject, Project, UpdateProject};
pub use summary::Summary;
pub use task::{CreateTask, Task, TaskStatus, UpdateTask};
pub use user::{NewUser, User};
