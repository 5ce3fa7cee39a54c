//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own persistence so route handlers stay focused on
//! cookies, status codes, and JSON shapes.

pub mod email_auth;
pub mod session;
