use super::*;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, header};
use axum::routing::{get, post};
use tower::ServiceExt;

use crate::state::test_helpers::{test_app_state, test_config};

fn auth_router() -> Router {
    Router::new()
        .route("/api/auth/session", get(current_session))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(logout))
        .with_state(test_app_state())
}

// =============================================================================
// cookies
// =============================================================================

#[test]
fn session_cookie_is_http_only_lax_and_scoped_to_root() {
    let cookie = session_cookie("abc".to_owned(), &test_config());
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "abc");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.secure(), Some(false));
    assert_eq!(cookie.max_age(), Some(Duration::hours(24)));
}

#[test]
fn session_cookie_honors_secure_flag() {
    let mut config = test_config();
    config.cookie_secure = true;
    assert_eq!(session_cookie("abc".to_owned(), &config).secure(), Some(true));
}

#[test]
fn cleared_cookie_expires_immediately() {
    let cookie = cleared_cookie(false);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}

#[test]
fn session_token_ignores_empty_cookie() {
    let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, ""));
    assert_eq!(session_token(&jar), None);
    let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, "tok"));
    assert_eq!(session_token(&jar), Some("tok"));
}

// =============================================================================
// error mapping
// =============================================================================

#[test]
fn email_auth_errors_map_to_statuses() {
    assert_eq!(email_auth_error_status(&EmailAuthError::InvalidEmail), StatusCode::BAD_REQUEST);
    assert_eq!(email_auth_error_status(&EmailAuthError::InvalidCode), StatusCode::BAD_REQUEST);
    assert_eq!(email_auth_error_status(&EmailAuthError::VerificationFailed), StatusCode::UNAUTHORIZED);
    assert_eq!(
        email_auth_error_status(&EmailAuthError::Delivery("down".into())),
        StatusCode::BAD_GATEWAY
    );
    assert_eq!(
        email_auth_error_status(&EmailAuthError::Db(sqlx::Error::PoolTimedOut)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn request_code_response_omits_code_unless_echoed() {
    let hidden = serde_json::to_value(RequestCodeResponse { ok: true, code: None }).unwrap();
    assert_eq!(hidden, serde_json::json!({ "ok": true }));
    let echoed = serde_json::to_value(RequestCodeResponse { ok: true, code: Some("ABC234".into()) }).unwrap();
    assert_eq!(echoed["code"], "ABC234");
}

// =============================================================================
// handlers without a session cookie
// =============================================================================

#[tokio::test]
async fn session_without_cookie_reports_null_user() {
    let request = Request::builder().uri("/api/auth/session").body(Body::empty()).unwrap();
    let response = auth_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "user": null }));
}

#[tokio::test]
async fn refresh_without_cookie_is_unauthorized() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/refresh")
        .body(Body::empty())
        .unwrap();
    let response = auth_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn logout_without_session_still_clears_cookie() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .header(header::COOKIE, format!("{COOKIE_NAME}="))
        .body(Body::empty())
        .unwrap();
    let response = auth_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with(&format!("{COOKIE_NAME}=;")), "{set_cookie}");
    assert!(set_cookie.contains("Max-Age=0"), "{set_cookie}");
}
