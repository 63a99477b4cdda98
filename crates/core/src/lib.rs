//! Taskdeck domain core.
//!
//! Pure domain types and logic shared by every other crate:
//!
//! - [`types`] — id and timestamp aliases.
//! - [`error`] — the [`CoreError`](error::CoreError) domain error.
//! - [`entities`] — one module per entity type (users, projects, tasks,
//!   notes, files, drawings, summaries) with their create/update DTOs.
//! - [`normalize`] — extraction of display text from heterogeneous
//!   generative-AI response payloads.
//! - [`prompt`] — assembly of the backlog-summary prompt.
//!
//! This crate performs no I/O and has no async dependencies.

pub mod entities;
pub mod error;
pub mod normalize;
pub mod prompt;
pub mod types;
