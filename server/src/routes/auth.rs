//! Auth routes: email access codes, session lookup, refresh, and logout.
//!
//! The session token lives in an `HttpOnly` cookie; the browser never sees it.
//! Every response that establishes or ends a session rewrites that cookie.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::services::email_auth::{self, EmailAuthError};
use crate::services::session::{self, SessionUser};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

/// Body of every endpoint that reports the signed-in user.
#[derive(Debug, Serialize)]
pub struct SessionBody {
    pub user: Option<SessionUser>,
}

pub(crate) fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(COOKIE_NAME).map(Cookie::value).filter(|v| !v.is_empty())
}

/// Look up the user behind the request's session cookie.
///
/// # Errors
///
/// Propagates database failures; a missing or expired token is `Ok(None)`.
pub(crate) async fn resolve_session(state: &AppState, jar: &CookieJar) -> Result<Option<SessionUser>, sqlx::Error> {
    match session_token(jar) {
        Some(token) => session::validate_session(&state.pool, token).await,
        None => Ok(None),
    }
}

fn session_cookie(token: String, config: &crate::config::ServerConfig) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::hours(i64::from(config.session_ttl_hours)))
        .build()
}

fn cleared_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/session`: current user, or `{"user": null}`.
///
/// Never 401s: the client treats "no session" as a normal answer.
pub async fn current_session(State(state): State<AppState>, jar: CookieJar) -> Result<Json<SessionBody>, StatusCode> {
    let user = resolve_session(&state, &jar).await.map_err(|e| {
        tracing::error!(error = %e, "session lookup failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(SessionBody { user }))
}

#[derive(Debug, Deserialize)]
pub struct RequestCodeBody {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RequestCodeResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// `POST /api/auth/email/request-code`: issue and deliver an access code.
pub async fn request_email_code(State(state): State<AppState>, Json(body): Json<RequestCodeBody>) -> Response {
    let issued = match email_auth::issue_access_code(&state.pool, &body.email).await {
        Ok(issued) => issued,
        Err(e) => return email_auth_error_response(&e),
    };

    if let Some(resend) = &state.config.resend {
        if let Err(e) = email_auth::send_access_code_email(resend, &issued.email, &issued.code).await {
            return email_auth_error_response(&e);
        }
    } else if !state.config.email_code_echo {
        tracing::warn!(email = %issued.email, "no email transport configured; access code not delivered");
    }

    tracing::info!(email = %issued.email, "access code issued");
    let code = state.config.email_code_echo.then_some(issued.code);
    Json(RequestCodeResponse { ok: true, code }).into_response()
}

#[derive(Debug, Deserialize)]
pub struct VerifyCodeBody {
    pub email: String,
    pub code: String,
}

/// `POST /api/auth/email/verify-code`: redeem a code, start a session.
pub async fn verify_email_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyCodeBody>,
) -> Response {
    let user_id = match email_auth::redeem_access_code(&state.pool, &body.email, &body.code).await {
        Ok(id) => id,
        Err(e) => return email_auth_error_response(&e),
    };

    let token = match session::create_session(&state.pool, user_id, state.config.session_ttl_hours).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let user = match session::find_user(&state.pool, user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return StatusCode::UNAUTHORIZED.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "user lookup failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    tracing::info!(user_id = %user.id, "signed in with access code");
    let jar = jar.add(session_cookie(token, &state.config));
    (jar, Json(SessionBody { user: Some(user) })).into_response()
}

/// `POST /api/auth/refresh`: slide the session expiry forward.
///
/// 401 (and a cleared cookie) when the session is already gone.
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(token) = session_token(&jar).map(str::to_owned) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    match session::refresh_session(&state.pool, &token, state.config.session_ttl_hours).await {
        Ok(Some(user)) => {
            let jar = jar.add(session_cookie(token, &state.config));
            (jar, Json(SessionBody { user: Some(user) })).into_response()
        }
        Ok(None) => {
            let jar = jar.add(cleared_cookie(state.config.cookie_secure));
            (jar, StatusCode::UNAUTHORIZED).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "session refresh failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `POST /api/auth/logout`: delete the session if any, always clear the cookie.
///
/// A stale or expired cookie still gets cleared, so logout never 401s.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = session_token(&jar) {
        if let Err(e) = session::delete_session(&state.pool, token).await {
            tracing::warn!(error = %e, "session delete failed");
        }
    }

    let jar = jar.add(cleared_cookie(state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

fn email_auth_error_status(err: &EmailAuthError) -> StatusCode {
    match err {
        EmailAuthError::InvalidEmail | EmailAuthError::InvalidCode => StatusCode::BAD_REQUEST,
        EmailAuthError::VerificationFailed => StatusCode::UNAUTHORIZED,
        EmailAuthError::Delivery(_) => StatusCode::BAD_GATEWAY,
        EmailAuthError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn email_auth_error_response(err: &EmailAuthError) -> Response {
    let status = email_auth_error_status(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "email auth failed");
    }
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
