//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth_provider` owns reactive identity state, `layout_selector` picks a
//! shell, and the two shells render chrome around routed page content.

pub mod auth_provider;
pub mod desktop_shell;
pub mod layout_selector;
pub mod mobile_shell;
pub mod nav;
