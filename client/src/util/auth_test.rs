use super::*;
use crate::net::types::Identity;

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { user: None, loading: true };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = AuthState {
        user: Some(Identity {
            id: "u1".to_owned(),
            email: Some("alice@example.com".to_owned()),
            name: Some("Alice".to_owned()),
            avatar_url: None,
            metadata: serde_json::Value::Null,
        }),
        loading: false,
    };
    assert!(!should_redirect_unauth(&state));
}
