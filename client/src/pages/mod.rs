//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates chrome to the
//! layout shells in `components`.

pub mod dashboard;
pub mod login;
pub mod overview;
pub mod reset_layout;
pub mod section;
