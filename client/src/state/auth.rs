//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session provider drives a [`SessionSync`] from two independent
//! sources: one initial `get_session` fetch and a long-lived stream of auth
//! events. Route guards and shell headers read the resulting [`AuthState`].
//!
//! ORDERING
//! ========
//! Every update is stamped from one monotonically increasing sequence when it
//! is issued. The initial fetch takes its stamp before the subscription is
//! registered, so any event applied while the fetch is in flight carries a
//! newer stamp and the late fetch result is dropped instead of overwriting
//! it. `loading` still settles when the fetch resolves.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::auth_client::AuthClientError;
use crate::net::types::{AuthEvent, Identity};
use crate::state::user_cache::UserCache;

/// Authentication state tracking the current user and loading status.
///
/// `loading` is true only until the first session resolution completes.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<Identity>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    /// Id of the current user, derived from `user`.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Stamp taken when the initial session fetch is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Reconciles the initial session fetch with auth events and mirrors every
/// identity change into a [`UserCache`].
///
/// Each method returns the new published state, or `None` when nothing
/// observable changed (stale fetch after settle, or updates after
/// [`SessionSync::deactivate`]).
#[derive(Debug)]
pub struct SessionSync {
    state: AuthState,
    cache: UserCache,
    issued_seq: u64,
    applied_seq: u64,
    active: bool,
}

impl SessionSync {
    #[must_use]
    pub fn new(cache: UserCache) -> Self {
        Self {
            state: AuthState::default(),
            cache,
            issued_seq: 0,
            applied_seq: 0,
            active: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &AuthState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    /// Stamp the initial session fetch. Call before subscribing to events.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_seq += 1;
        FetchTicket(self.issued_seq)
    }

    /// Apply the initial fetch result.
    ///
    /// A failed fetch counts as "no session". The user is only replaced when
    /// no newer update has been applied; `loading` settles either way.
    pub fn resolve_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Option<Identity>, AuthClientError>,
    ) -> Option<AuthState> {
        if !self.active {
            log::debug!("session fetch resolved after teardown; ignoring");
            return None;
        }

        let user = result.unwrap_or_else(|e| {
            log::debug!("session fetch failed, treating as signed out: {e}");
            None
        });

        let fresh = ticket.0 > self.applied_seq;
        if fresh {
            self.applied_seq = ticket.0;
            self.set_user(user);
        } else {
            log::debug!("dropping stale session fetch (ticket {}, applied {})", ticket.0, self.applied_seq);
            if !self.state.loading {
                return None;
            }
        }

        self.state.loading = false;
        Some(self.state.clone())
    }

    /// Apply one auth-state-change event. Leaves `loading` untouched.
    pub fn apply_event(&mut self, event: &AuthEvent) -> Option<AuthState> {
        if !self.active {
            log::debug!("auth event {:?} after teardown; ignoring", event.kind);
            return None;
        }
        self.issued_seq += 1;
        self.applied_seq = self.issued_seq;
        self.set_user(event.user.clone());
        Some(self.state.clone())
    }

    /// Stop applying updates. Irreversible.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    fn set_user(&mut self, user: Option<Identity>) {
        self.cache.store(user.clone());
        self.state.user = user;
    }
}
