//! Auth service client: session lookup, sign-in/out, and auth-state events.
//!
//! SYSTEM CONTEXT
//! ==============
//! There is exactly one `AuthClient` per process (see [`client`]) so the
//! session provider never ends up with duplicate subscriptions. HTTP calls go
//! through `gloo-net` in the browser; on the server they report
//! [`AuthClientError::Unavailable`] because session state only exists in the
//! browser's cookie jar.
//!
//! Every state-changing call (sign-in, sign-out, refresh) emits an
//! [`AuthEvent`] to all listeners after the server confirms it.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "auth_client_test.rs"]
mod auth_client_test;

use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};

use super::types::{AuthEvent, Identity};

#[cfg(feature = "hydrate")]
use super::types::SessionResponse;

/// Interval between background session refreshes.
pub const REFRESH_INTERVAL_SECS: u64 = 15 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthClientError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("{0}")]
    Rejected(String),
    #[error("auth service is only reachable from the browser")]
    Unavailable,
}

type Listener = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Handle for one `on_auth_state_change` registration.
///
/// Dropping the handle unregisters the callback as well.
#[must_use = "dropping a Subscription unregisters its callback"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// Stop receiving auth events. Events emitted afterwards never reach the
    /// callback.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let mut inner = listeners.lock().unwrap_or_else(PoisonError::into_inner);
            inner.entries.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Client for the server auth routes plus an in-process auth event bus.
#[derive(Default)]
pub struct AuthClient {
    listeners: Arc<Mutex<Listeners>>,
}

impl AuthClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for every subsequent auth-state change.
    pub fn on_auth_state_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let mut inner = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        let id = inner.next_id;
        inner.entries.push((id, Arc::new(callback)));
        Subscription { id, listeners: Arc::downgrade(&self.listeners) }
    }

    /// Deliver `event` to every registered listener in registration order.
    ///
    /// Listeners are snapshotted first, so a callback may unsubscribe (or
    /// subscribe) without deadlocking the bus.
    pub fn emit(&self, event: &AuthEvent) {
        let snapshot: Vec<Listener> = {
            let inner = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            inner.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        log::debug!("auth event {:?} -> {} listener(s)", event.kind, snapshot.len());
        for listener in snapshot {
            listener(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).entries.len()
    }

    /// Resolve the current session from `GET /api/auth/session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers non-2xx, or
    /// the body does not decode. Callers treat any error as "no session".
    pub async fn get_session(&self) -> Result<Option<Identity>, AuthClientError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get("/api/auth/session")
                .send()
                .await
                .map_err(|e| AuthClientError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(AuthClientError::Status(resp.status()));
            }
            let body: SessionResponse = resp
                .json()
                .await
                .map_err(|e| AuthClientError::Decode(e.to_string()))?;
            Ok(body.user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthClientError::Unavailable)
        }
    }

    /// Ask the server to issue an email access code.
    ///
    /// Returns the code itself only when the server is configured to echo it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the email.
    pub async fn request_code(&self, email: &str) -> Result<Option<String>, AuthClientError> {
        #[cfg(feature = "hydrate")]
        {
            #[derive(serde::Deserialize)]
            struct RequestCodeResponse {
                ok: bool,
                code: Option<String>,
            }

            let payload = serde_json::json!({ "email": email });
            let resp = gloo_net::http::Request::post("/api/auth/email/request-code")
                .json(&payload)
                .map_err(|e| AuthClientError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthClientError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(AuthClientError::Status(resp.status()));
            }
            let body: RequestCodeResponse = resp
                .json()
                .await
                .map_err(|e| AuthClientError::Decode(e.to_string()))?;
            if !body.ok {
                return Err(AuthClientError::Rejected("request code failed".to_owned()));
            }
            Ok(body.code)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(AuthClientError::Unavailable)
        }
    }

    /// Exchange an email + access code for a session cookie, then emit
    /// `SIGNED_IN`.
    ///
    /// # Errors
    ///
    /// Returns an error if verification fails or the response has no user.
    pub async fn sign_in_with_code(&self, email: &str, code: &str) -> Result<Identity, AuthClientError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email, "code": code });
            let resp = gloo_net::http::Request::post("/api/auth/email/verify-code")
                .json(&payload)
                .map_err(|e| AuthClientError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthClientError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(AuthClientError::Status(resp.status()));
            }
            let body: SessionResponse = resp
                .json()
                .await
                .map_err(|e| AuthClientError::Decode(e.to_string()))?;
            let user = body
                .user
                .ok_or_else(|| AuthClientError::Rejected("sign-in returned no user".to_owned()))?;
            self.emit(&AuthEvent::signed_in(user.clone()));
            Ok(user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, code);
            Err(AuthClientError::Unavailable)
        }
    }

    /// End the server session, then emit `SIGNED_OUT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout request cannot be delivered. A 401 is
    /// treated as already signed out.
    pub async fn sign_out(&self) -> Result<(), AuthClientError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post("/api/auth/logout")
                .send()
                .await
                .map_err(|e| AuthClientError::Transport(e.to_string()))?;
            if !resp.ok() && resp.status() != 401 {
                return Err(AuthClientError::Status(resp.status()));
            }
            self.emit(&AuthEvent::signed_out());
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthClientError::Unavailable)
        }
    }

    /// Extend the server session and emit `TOKEN_REFRESHED`, or `SIGNED_OUT`
    /// when the session is gone.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unexpected status; no
    /// event is emitted in that case.
    pub async fn refresh_session(&self) -> Result<Option<Identity>, AuthClientError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post("/api/auth/refresh")
                .send()
                .await
                .map_err(|e| AuthClientError::Transport(e.to_string()))?;
            let user = match resp.status() {
                401 => None,
                status if !resp.ok() => return Err(AuthClientError::Status(status)),
                _ => {
                    resp.json::<SessionResponse>()
                        .await
                        .map_err(|e| AuthClientError::Decode(e.to_string()))?
                        .user
                }
            };
            self.emit(&AuthEvent::refreshed(user.clone()));
            Ok(user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthClientError::Unavailable)
        }
    }
}

/// The process-wide auth client.
pub fn client() -> &'static AuthClient {
    static CLIENT: OnceLock<AuthClient> = OnceLock::new();
    CLIENT.get_or_init(AuthClient::new)
}

/// Start the background refresh loop once per process.
///
/// Refreshes only while the user cache holds an identity, so a signed-out tab
/// stays quiet.
pub fn spawn_refresh_loop() {
    #[cfg(feature = "hydrate")]
    {
        use std::sync::atomic::{AtomicBool, Ordering};

        static STARTED: AtomicBool = AtomicBool::new(false);
        if STARTED.swap(true, Ordering::SeqCst) {
            return;
        }
        wasm_bindgen_futures::spawn_local(async {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(REFRESH_INTERVAL_SECS)).await;
                if crate::state::user_cache::current_user().is_none() {
                    continue;
                }
                if let Err(e) = client().refresh_session().await {
                    log::warn!("session refresh failed: {e}");
                }
            }
        });
    }
}
