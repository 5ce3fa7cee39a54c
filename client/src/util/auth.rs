//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server guard keeps unauthenticated callers out of the dashboard on the
//! first request. These helpers cover what happens afterwards, when a sign-out
//! or expired refresh arrives while a shell is already on screen.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";

/// Whether the view should leave for the login route.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && !state.is_authenticated()
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: ReadSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if auth.with(should_redirect_unauth) {
            navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Ask the auth service to end the session. The provider's sign-out event
/// then drives the redirect to the login page.
pub fn sign_out() {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        if let Err(e) = crate::net::auth_client::client().sign_out().await {
            log::warn!("sign out failed: {e}");
        }
    });
}
