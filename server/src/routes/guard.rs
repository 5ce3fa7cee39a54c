//! Server-side admission for the dashboard subtree.
//!
//! Runs before Leptos SSR renders anything: a request for a dashboard path
//! with no live session gets a redirect to `/login`, so the shell markup is
//! never produced for an anonymous caller.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use super::auth::resolve_session;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

const PUBLIC_PAGES: &[&str] = &[LOGIN_PATH, "/reset-layout", "/healthz", "/favicon.ico"];
const PUBLIC_PREFIXES: &[&str] = &["/pkg/", "/api/"];

/// Outcome of the admission check for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allow,
    Redirect(&'static str),
}

fn trim_path(path: &str) -> &str {
    if path.len() > 1 { path.trim_end_matches('/') } else { path }
}

fn is_login_path(path: &str) -> bool {
    trim_path(path) == LOGIN_PATH
}

/// Paths that render without a session.
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    let trimmed = trim_path(path);
    PUBLIC_PAGES.contains(&trimmed)
        || PUBLIC_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix) || trimmed == prefix.trim_end_matches('/'))
}

#[must_use]
pub fn admission(path: &str, authenticated: bool) -> Admission {
    if authenticated && is_login_path(path) {
        return Admission::Redirect(HOME_PATH);
    }
    if authenticated || is_public_path(path) {
        Admission::Allow
    } else {
        Admission::Redirect(LOGIN_PATH)
    }
}

/// Axum middleware enforcing [`admission`].
pub async fn require_session(State(state): State<AppState>, jar: CookieJar, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();

    // Static assets and API calls skip the session lookup.
    if !is_login_path(&path) && is_public_path(&path) {
        return next.run(request).await;
    }

    let authenticated = match resolve_session(&state, &jar).await {
        Ok(user) => user.is_some(),
        Err(e) => {
            tracing::error!(error = %e, %path, "session lookup failed in route guard");
            false
        }
    };

    match admission(&path, authenticated) {
        Admission::Allow => next.run(request).await,
        Admission::Redirect(target) => {
            tracing::debug!(%path, %target, "route guard redirect");
            Redirect::to(target).into_response()
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
