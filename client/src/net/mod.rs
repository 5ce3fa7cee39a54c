//! Network-facing modules for the auth service boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` holds the serde DTOs shared with the server; `auth_client` wraps the
//! HTTP calls and the in-process auth event bus.

pub mod auth_client;
pub mod types;
