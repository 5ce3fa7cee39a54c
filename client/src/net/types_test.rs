use super::*;

fn identity(id: &str, email: Option<&str>, name: Option<&str>) -> Identity {
    Identity {
        id: id.to_owned(),
        email: email.map(str::to_owned),
        name: name.map(str::to_owned),
        avatar_url: None,
        metadata: serde_json::Value::Null,
    }
}

// =============================================================
// Identity
// =============================================================

#[test]
fn identity_deserializes_with_only_id() {
    let user: Identity = serde_json::from_str(r#"{"id":"u-1"}"#).unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.email, None);
    assert_eq!(user.name, None);
    assert!(user.metadata.is_null());
}

#[test]
fn identity_keeps_provider_metadata() {
    let user: Identity =
        serde_json::from_str(r#"{"id":"u-1","email":"a@b.com","metadata":{"plan":"pro"}}"#).unwrap();
    assert_eq!(user.email.as_deref(), Some("a@b.com"));
    assert_eq!(user.metadata["plan"], "pro");
}

#[test]
fn display_label_prefers_name_then_email_then_id() {
    assert_eq!(identity("u-1", Some("a@b.com"), Some("Alice")).display_label(), "Alice");
    assert_eq!(identity("u-1", Some("a@b.com"), Some("  ")).display_label(), "a@b.com");
    assert_eq!(identity("u-1", None, None).display_label(), "u-1");
}

#[test]
fn initials_from_name_and_email() {
    assert_eq!(identity("u-1", None, Some("alice smith")).initials(), "AS");
    assert_eq!(identity("u-1", Some("jane.doe@example.com"), None).initials(), "JD");
    assert_eq!(identity("u-1", Some("bob@example.com"), None).initials(), "B");
}

// =============================================================
// SessionResponse
// =============================================================

#[test]
fn session_response_null_user() {
    let resp: SessionResponse = serde_json::from_str(r#"{"user":null}"#).unwrap();
    assert_eq!(resp.user, None);
}

#[test]
fn session_response_missing_user_defaults_to_none() {
    let resp: SessionResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(resp, SessionResponse::default());
}

// =============================================================
// AuthEvent
// =============================================================

#[test]
fn auth_event_kind_wire_names() {
    assert_eq!(serde_json::to_value(AuthEventKind::SignedIn).unwrap(), "SIGNED_IN");
    assert_eq!(serde_json::to_value(AuthEventKind::TokenRefreshed).unwrap(), "TOKEN_REFRESHED");
}

#[test]
fn refreshed_without_user_is_sign_out() {
    assert_eq!(AuthEvent::refreshed(None), AuthEvent::signed_out());
    let user = identity("u-1", None, None);
    let event = AuthEvent::refreshed(Some(user.clone()));
    assert_eq!(event.kind, AuthEventKind::TokenRefreshed);
    assert_eq!(event.user, Some(user));
}
