//! Process-wide cache of the last-known identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! Some call sites (background refresh, non-component helpers) need the
//! current user synchronously, outside the reactive tree. The session
//! provider is the only writer; it mirrors every identity change here.
//!
//! The cache is eventually consistent with the reactive `AuthState`: a reader
//! can observe the previous identity between an auth event firing and the
//! provider's mirrored write, which happen in the same task.

#[cfg(test)]
#[path = "user_cache_test.rs"]
mod user_cache_test;

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::net::types::Identity;

/// Shared handle to a cached identity. Clones point at the same slot.
#[derive(Clone, Debug, Default)]
pub struct UserCache {
    slot: Arc<RwLock<Option<Identity>>>,
}

impl UserCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached identity. `None` records a sign-out.
    pub fn store(&self, user: Option<Identity>) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    #[must_use]
    pub fn get(&self) -> Option<Identity> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// The cache shared by the whole process.
pub fn global() -> &'static UserCache {
    static CACHE: OnceLock<UserCache> = OnceLock::new();
    CACHE.get_or_init(UserCache::new)
}

/// Synchronous read of the current user from the global cache.
#[must_use]
pub fn current_user() -> Option<Identity> {
    global().get()
}
