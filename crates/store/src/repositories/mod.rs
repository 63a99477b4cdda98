//! Per-entity SQL modules used by the Postgres implementation of
//! [`EntityStore`](crate::EntityStore). Ownership checks live one level
//! up, in [`postgres`](crate::postgres); these modules are plain CRUD.

pub mod drawing_repo;
pub mod file_repo;
pub mod note_repo;
pub mod project_repo;
pub mod summary_repo;
pub mod task_note_repo;
pub mod task_repo;
pub mod user_repo;

pub use drawing_repo::DrawingRepo;
pub use file_repo::FileRepo;
pub use note_repo::NoteRepo;
pub use project_repo::ProjectRepo;
pub use summary_repo::SummaryRepo;
pub use task_note_repo::TaskNoteRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
