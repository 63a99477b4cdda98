pub mod ai;
pub mod auth;
pub mod drawing;
pub mod file;
pub mod note;
pub mod project;
pub mod share;
pub mod summary;
pub mod task;
pub mod task_note;
pub mod weather;
