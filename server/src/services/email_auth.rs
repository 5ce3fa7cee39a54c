//! Email access-code sign-in.
//!
//! ARCHITECTURE
//! ============
//! `issue_access_code` upserts the user and stores a SHA-256 hash of a fresh
//! six-character code; the plaintext only leaves this module in the return
//! value. `redeem_access_code` consumes the newest live code for an email
//! inside one transaction, so two concurrent redemptions cannot both succeed.
//! Each wrong guess counts against the code and the code burns out after
//! `MAX_FAILED_ATTEMPTS`.

use rand::Rng;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::session::bytes_to_hex;
use crate::config::ResendConfig;

const CODE_LEN: usize = 6;
/// No `0/O` or `1/I`, so codes survive being read aloud.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const MAX_FAILED_ATTEMPTS: i32 = 5;
const EMAIL_SUBJECT: &str = "Your Finboard access code";
const EMAIL_AUTH_TEMPLATE: &str = include_str!("../../templates/email_auth.html");
/// A new code supersedes every earlier row for the address: live, consumed,
/// or expired.
const PURGE_CODES_SQL: &str = "DELETE FROM email_login_codes WHERE email = $1";

#[derive(Debug, thiserror::Error)]
pub enum EmailAuthError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid code")]
    InvalidCode,
    #[error("expired or incorrect code")]
    VerificationFailed,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

/// A freshly issued code and the normalized address it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    pub email: String,
    pub code: String,
}

/// Lowercase and trim an address; `None` unless it has exactly one `@` with
/// text on both sides.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn normalize_code(code: &str) -> Option<String> {
    let normalized = code.trim().to_ascii_uppercase();
    let valid = normalized.len() == CODE_LEN && normalized.bytes().all(|b| CODE_ALPHABET.contains(&b));
    valid.then_some(normalized)
}

#[must_use]
pub fn generate_access_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| char::from(CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())]))
        .collect()
}

#[must_use]
pub fn hash_access_code(code: &str) -> String {
    bytes_to_hex(&Sha256::digest(code.as_bytes()))
}

/// Default display name for a new account: the local part of the address.
fn default_name(email: &str) -> &str {
    email.split('@').next().filter(|v| !v.trim().is_empty()).unwrap_or("user")
}

/// Issue a new code for `email`, replacing every earlier code row.
///
/// # Errors
///
/// Returns [`EmailAuthError::InvalidEmail`] for a malformed address, or a
/// database error.
pub async fn issue_access_code(pool: &PgPool, email: &str) -> Result<IssuedCode, EmailAuthError> {
    let email = normalize_email(email).ok_or(EmailAuthError::InvalidEmail)?;
    let code = generate_access_code();

    let mut tx = pool.begin().await?;
    sqlx::query("INSERT INTO users (email, name) VALUES ($1, $2) ON CONFLICT (email) DO NOTHING")
        .bind(&email)
        .bind(default_name(&email))
        .execute(&mut *tx)
        .await?;
    sqlx::query(PURGE_CODES_SQL)
        .bind(&email)
        .execute(&mut *tx)
        .await?;
    sqlx::query("INSERT INTO email_login_codes (email, code_hash) VALUES ($1, $2)")
        .bind(&email)
        .bind(hash_access_code(&code))
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(IssuedCode { email, code })
}

/// Consume the newest live code for `email` and return the user id.
///
/// # Errors
///
/// Returns [`EmailAuthError::VerificationFailed`] when no live code matches.
/// A mismatch still counts as an attempt.
pub async fn redeem_access_code(pool: &PgPool, email: &str, code: &str) -> Result<Uuid, EmailAuthError> {
    let email = normalize_email(email).ok_or(EmailAuthError::InvalidEmail)?;
    let code = normalize_code(code).ok_or(EmailAuthError::InvalidCode)?;

    let mut tx = pool.begin().await?;
    let live = sqlx::query(
        r"SELECT id, code_hash
          FROM email_login_codes
          WHERE email = $1 AND consumed_at IS NULL AND expires_at > now()
          ORDER BY created_at DESC
          LIMIT 1
          FOR UPDATE",
    )
    .bind(&email)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(live) = live else {
        return Err(EmailAuthError::VerificationFailed);
    };
    let code_id: Uuid = live.get("id");
    let stored_hash: String = live.get("code_hash");

    if stored_hash != hash_access_code(&code) {
        sqlx::query(
            r"UPDATE email_login_codes
              SET attempts = attempts + 1,
                  consumed_at = CASE WHEN attempts + 1 >= $2 THEN now() ELSE NULL END
              WHERE id = $1",
        )
        .bind(code_id)
        .bind(MAX_FAILED_ATTEMPTS)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        return Err(EmailAuthError::VerificationFailed);
    }

    sqlx::query("UPDATE email_login_codes SET consumed_at = now() WHERE id = $1")
        .bind(code_id)
        .execute(&mut *tx)
        .await?;
    let user_id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&mut *tx)
        .await?;
    tx.commit().await?;

    user_id.ok_or(EmailAuthError::VerificationFailed)
}

/// Deliver `code` to `to_email` through Resend.
///
/// # Errors
///
/// Returns [`EmailAuthError::Delivery`] if Resend rejects the send.
pub async fn send_access_code_email(resend: &ResendConfig, to_email: &str, code: &str) -> Result<(), EmailAuthError> {
    let client = Resend::new(&resend.api_key);
    let html = render_email_auth_template(to_email, code);
    let message = CreateEmailBaseOptions::new(&resend.from, [to_email], EMAIL_SUBJECT).with_html(&html);
    client
        .emails
        .send(message)
        .await
        .map_err(|e| EmailAuthError::Delivery(e.to_string()))?;
    Ok(())
}

#[must_use]
pub fn render_email_auth_template(email: &str, code: &str) -> String {
    EMAIL_AUTH_TEMPLATE
        .replace("{{EMAIL}}", &escape_html(email))
        .replace("{{CODE}}", code)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "email_auth_test.rs"]
mod tests;
