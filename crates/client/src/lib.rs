//! Client library for the taskdeck API.
//!
//! Three pieces:
//!
//! - [`http::ApiClient`] — typed HTTP client for the `/api/v1` surface.
//! - [`board`] — the kanban board cache with the optimistic
//!   status-mutation protocol (apply locally, persist, roll back on
//!   failure).
//! - [`summary`] — the summary orchestrator: build a prompt, try the
//!   server-side proxy, fall back to a direct provider call, and as a
//!   last resort hand the raw prompt back to the caller.

pub mod board;
pub mod http;
pub mod summary;

pub use board::{move_task, BoardCache, MutationState, StatusMutation, TaskPersist};
pub use http::{ApiClient, ClientError};
pub use summary::{fetch_backlog, generate_summary, SummaryChannel, SummaryOutcome, SummarySink};
