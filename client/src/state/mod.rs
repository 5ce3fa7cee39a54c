//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `layout`, `user_cache`) so components
//! depend on small focused models. Everything here is framework-free and unit
//! tested natively; components wrap these types in Leptos signals.

pub mod auth;
pub mod layout;
pub mod user_cache;
