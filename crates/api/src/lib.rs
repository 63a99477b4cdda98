//! HTTP API server for taskdeck.
//!
//! Exposes the `/api/v1` surface: auth, project/task/note/file/drawing
//! CRUD, public share-link reads, the generative summary proxy, and the
//! weather widget endpoint. Storage is selected once at startup and
//! injected as trait objects; handlers never know which backend they
//! are talking to.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod weather;
