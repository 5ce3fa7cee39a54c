//! Reactive session provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once at the app root. On activation it stamps and issues the
//! initial session fetch, subscribes to auth events, and feeds both into a
//! [`SessionSync`]. The resulting [`AuthState`] is published read-only through
//! context; every identity change is mirrored into the global user cache.
//!
//! On cleanup the sync is deactivated before the subscription is dropped, so
//! an event or fetch that lands during teardown is a no-op.

use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::*;

use crate::net::auth_client;
use crate::state::auth::{AuthState, SessionSync};
use crate::state::user_cache;

/// Read the auth state published by the nearest [`AuthProvider`].
///
/// # Panics
///
/// Panics if called outside an `AuthProvider` subtree.
pub fn use_auth() -> ReadSignal<AuthState> {
    expect_context::<ReadSignal<AuthState>>()
}

/// Provide [`AuthState`] to all descendants.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let (auth, set_auth) = signal(AuthState::default());
    provide_context(auth);

    let sync = Arc::new(Mutex::new(SessionSync::new(user_cache::global().clone())));
    let ticket = sync.lock().unwrap_or_else(PoisonError::into_inner).begin_fetch();

    let event_sync = Arc::clone(&sync);
    let subscription = auth_client::client().on_auth_state_change(move |event| {
        let next = event_sync
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .apply_event(event);
        if let Some(state) = next {
            set_auth.set(state);
        }
    });

    #[cfg(feature = "hydrate")]
    {
        let fetch_sync = Arc::clone(&sync);
        leptos::task::spawn_local(async move {
            let result = auth_client::client().get_session().await;
            let next = fetch_sync
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .resolve_fetch(ticket, result);
            if let Some(state) = next {
                set_auth.set(state);
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = ticket;
    }

    on_cleanup(move || {
        sync.lock().unwrap_or_else(PoisonError::into_inner).deactivate();
        subscription.unsubscribe();
    });

    children()
}
