//! Shared wire DTOs for the client/server auth boundary.
//!
//! DESIGN
//! ======
//! These types mirror the JSON emitted by the server auth routes so serde
//! round-trips stay lossless. Provider-defined fields the UI does not read
//! are kept in `metadata` rather than dropped.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authenticated user's minimal profile as asserted by the auth service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque user identifier (UUID string on the wire).
    pub id: String,
    /// Sign-in email, if the account has one.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar image URL, if available.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Provider-defined extras.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Identity {
    /// Label shown in shell headers: name, then email, then the raw id.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }

    /// One or two uppercase initials for avatar placeholders.
    #[must_use]
    pub fn initials(&self) -> String {
        let label = self.display_label();
        let label = label.split('@').next().unwrap_or(label);
        label
            .split(|c: char| c.is_whitespace() || c == '.' || c == '_' || c == '-')
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Body of `GET /api/auth/session` and the sign-in/refresh responses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub user: Option<Identity>,
}

/// Kind of auth-state change reported to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEventKind {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// One auth-state change and the session user it leaves behind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub user: Option<Identity>,
}

impl AuthEvent {
    #[must_use]
    pub fn signed_in(user: Identity) -> Self {
        Self { kind: AuthEventKind::SignedIn, user: Some(user) }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self { kind: AuthEventKind::SignedOut, user: None }
    }

    /// A refresh that found no session is reported as a sign-out.
    #[must_use]
    pub fn refreshed(user: Option<Identity>) -> Self {
        match user {
            Some(user) => Self { kind: AuthEventKind::TokenRefreshed, user: Some(user) },
            None => Self::signed_out(),
        }
    }
}
