//! Session token management.
//!
//! ARCHITECTURE
//! ============
//! Browser auth uses an opaque random token stored in an `HttpOnly` cookie and
//! the `sessions` table. Validation joins the user row so the route guard and
//! `/api/auth/session` share one lookup. Refresh slides `expires_at` forward.

use std::fmt::Write;

use rand::Rng;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// User row returned from session validation. Serializes to the client's
/// `Identity` shape.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SessionUser {
    /// Unique user identifier.
    pub id: Uuid,
    /// Sign-in email, if any.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Avatar image URL, if available.
    pub avatar_url: Option<String>,
}

impl SessionUser {
    fn from_row(row: &PgRow) -> Self {
        Self {
            id: row.get("id"),
            email: row.get("email"),
            name: row.get("name"),
            avatar_url: row.get("avatar_url"),
        }
    }
}

/// Drops the user's dead sessions so the table does not grow per sign-in.
const PURGE_EXPIRED_SESSIONS_SQL: &str = "DELETE FROM sessions WHERE user_id = $1 AND expires_at <= now()";
const INSERT_SESSION_SQL: &str =
    "INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, now() + make_interval(hours => $3))";

/// Create a session for the given user, returning the token. Expired
/// sessions of the same user are purged in the same transaction.
pub async fn create_session(pool: &PgPool, user_id: Uuid, ttl_hours: i32) -> Result<String, sqlx::Error> {
    let token = generate_token();
    let mut tx = pool.begin().await?;
    sqlx::query(PURGE_EXPIRED_SESSIONS_SQL)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query(INSERT_SESSION_SQL)
        .bind(&token)
        .bind(user_id)
        .bind(ttl_hours)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.email, u.name, u.avatar_url
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(SessionUser::from_row))
}

/// Extend a live session by `ttl_hours` from now and return its user.
/// Expired or unknown tokens yield `None`.
pub async fn refresh_session(pool: &PgPool, token: &str, ttl_hours: i32) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"WITH refreshed AS (
              UPDATE sessions
              SET expires_at = now() + make_interval(hours => $2)
              WHERE token = $1 AND expires_at > now()
              RETURNING user_id
          )
          SELECT u.id, u.email, u.name, u.avatar_url
          FROM refreshed r
          JOIN users u ON u.id = r.user_id",
    )
    .bind(token)
    .bind(ttl_hours)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(SessionUser::from_row))
}

/// Delete a session by token.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Load a user row by id.
pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query("SELECT id, email, name, avatar_url FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(SessionUser::from_row))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
