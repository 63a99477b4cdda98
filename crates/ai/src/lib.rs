//! Client-side plumbing for the generative model provider.
//!
//! Two concerns live here: a thin HTTP client that turns a prompt
//! into the provider's raw JSON response ([`client::GenerativeClient`]),
//! and the OAuth service-account token exchange that authenticates it
//! ([`token::TokenProvider`]). Response interpretation is deliberately
//! left to callers; provider payload shapes vary too much to commit to
//! a typed response here.

pub mod client;
pub mod token;

pub use client::{AiError, GenerativeClient};
pub use token::{ServiceAccountKey, TokenProvider};
