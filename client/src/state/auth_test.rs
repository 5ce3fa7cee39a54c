use super::*;
use crate::net::types::AuthEventKind;

fn user(id: &str) -> Identity {
    Identity {
        id: id.to_owned(),
        email: None,
        name: None,
        avatar_url: None,
        metadata: serde_json::Value::Null,
    }
}

fn cached_id(cache: &UserCache) -> Option<String> {
    cache.get().map(|u| u.id)
}

fn sync() -> (SessionSync, UserCache) {
    let cache = UserCache::new();
    (SessionSync::new(cache.clone()), cache)
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_is_loading_without_user() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
    assert_eq!(state.user_id(), None);
}

#[test]
fn user_id_tracks_user() {
    let state = AuthState { user: Some(user("u-7")), loading: false };
    assert_eq!(state.user_id(), Some("u-7"));
    assert!(state.is_authenticated());
}

// =============================================================
// Initial fetch
// =============================================================

#[test]
fn unauthenticated_fetch_settles_loading_once() {
    let (mut sync, cache) = sync();
    cache.store(Some(user("previous-tab")));
    let ticket = sync.begin_fetch();

    let state = sync.resolve_fetch(ticket, Ok(None)).unwrap();
    assert_eq!(state, AuthState { user: None, loading: false });
    assert_eq!(state.user_id(), None);
    assert_eq!(cache.get(), None);
    assert_eq!(sync.resolve_fetch(ticket, Ok(None)), None);
}

#[test]
fn failed_fetch_is_treated_as_signed_out() {
    let (mut sync, _cache) = sync();
    let ticket = sync.begin_fetch();

    let state = sync
        .resolve_fetch(ticket, Err(AuthClientError::Status(500)))
        .unwrap();
    assert_eq!(state.user, None);
    assert!(!state.loading);
}

#[test]
fn authenticated_fetch_publishes_user_and_mirrors_cache() {
    let (mut sync, cache) = sync();
    let ticket = sync.begin_fetch();

    let state = sync.resolve_fetch(ticket, Ok(Some(user("u-1")))).unwrap();
    assert_eq!(state.user_id(), Some("u-1"));
    assert_eq!(cached_id(&cache).as_deref(), Some("u-1"));
}

// =============================================================
// Events
// =============================================================

#[test]
fn event_before_fetch_does_not_touch_loading() {
    let (mut sync, _cache) = sync();
    let _ticket = sync.begin_fetch();

    let state = sync.apply_event(&AuthEvent::signed_in(user("u-1"))).unwrap();
    assert!(state.loading);
    assert_eq!(state.user_id(), Some("u-1"));
}

#[test]
fn events_after_settle_replace_user() {
    let (mut sync, cache) = sync();
    let ticket = sync.begin_fetch();
    sync.resolve_fetch(ticket, Ok(Some(user("u-1"))));

    let state = sync.apply_event(&AuthEvent::signed_out()).unwrap();
    assert_eq!(state.user, None);
    assert!(!state.loading);
    assert_eq!(cache.get(), None);

    let state = sync.apply_event(&AuthEvent::signed_in(user("u-2"))).unwrap();
    assert_eq!(state.user_id(), Some("u-2"));
    assert_eq!(cached_id(&cache).as_deref(), Some("u-2"));
}

// =============================================================
// Fetch / event race
// =============================================================

#[test]
fn late_fetch_does_not_overwrite_newer_event() {
    let (mut sync, cache) = sync();
    let ticket = sync.begin_fetch();

    sync.apply_event(&AuthEvent::signed_in(user("fresh")));
    let state = sync.resolve_fetch(ticket, Ok(Some(user("stale")))).unwrap();

    assert_eq!(state.user_id(), Some("fresh"));
    assert!(!state.loading);
    assert_eq!(cached_id(&cache).as_deref(), Some("fresh"));
}

#[test]
fn late_empty_fetch_does_not_sign_out_newer_event() {
    let (mut sync, _cache) = sync();
    let ticket = sync.begin_fetch();

    sync.apply_event(&AuthEvent::signed_in(user("fresh")));
    let state = sync.resolve_fetch(ticket, Err(AuthClientError::Unavailable)).unwrap();

    assert_eq!(state.user_id(), Some("fresh"));
}

#[test]
fn stale_fetch_does_not_write_cache() {
    let (mut sync, cache) = sync();
    let ticket = sync.begin_fetch();
    sync.apply_event(&AuthEvent::signed_out());
    cache.store(Some(user("marker")));

    sync.resolve_fetch(ticket, Ok(Some(user("stale"))));
    assert_eq!(cached_id(&cache).as_deref(), Some("marker"));
}

#[test]
fn interleavings_end_on_latest_issued_update() {
    // (event users applied before the fetch, fetch user, events after the fetch)
    let cases: Vec<(Vec<Option<&str>>, Option<&str>, Vec<Option<&str>>, Option<&str>)> = vec![
        (vec![], Some("f"), vec![], Some("f")),
        (vec![], None, vec![Some("a")], Some("a")),
        (vec![Some("a")], Some("f"), vec![], Some("a")),
        (vec![Some("a"), None], Some("f"), vec![], None),
        (vec![None], Some("f"), vec![Some("b")], Some("b")),
        (vec![Some("a")], None, vec![Some("b"), None], None),
    ];

    for (before, fetched, after, expected) in cases {
        let (mut sync, cache) = sync();
        let ticket = sync.begin_fetch();
        let to_event = |u: Option<&str>| match u {
            Some(id) => AuthEvent::signed_in(user(id)),
            None => AuthEvent::signed_out(),
        };
        for u in &before {
            sync.apply_event(&to_event(*u));
        }
        sync.resolve_fetch(ticket, Ok(fetched.map(user)));
        for u in &after {
            sync.apply_event(&to_event(*u));
        }
        assert_eq!(sync.state().user_id(), expected, "before={before:?} fetched={fetched:?} after={after:?}");
        assert_eq!(cached_id(&cache).as_deref(), expected);
        assert!(!sync.state().loading);
    }
}

// =============================================================
// Teardown
// =============================================================

#[test]
fn no_cache_writes_after_deactivate() {
    let (mut sync, cache) = sync();
    let ticket = sync.begin_fetch();
    sync.apply_event(&AuthEvent::signed_in(user("u-1")));
    sync.deactivate();
    cache.store(Some(user("marker")));

    assert_eq!(sync.apply_event(&AuthEvent::signed_out()), None);
    assert_eq!(sync.resolve_fetch(ticket, Ok(None)), None);

    assert_eq!(cached_id(&cache).as_deref(), Some("marker"));
    assert!(!sync.is_active());
}

#[test]
fn pending_fetch_after_deactivate_leaves_loading() {
    let (mut sync, _cache) = sync();
    let ticket = sync.begin_fetch();
    sync.deactivate();

    assert_eq!(sync.resolve_fetch(ticket, Ok(Some(user("u-1")))), None);
    assert!(sync.state().loading);
}

#[test]
fn refresh_event_keeps_user() {
    let (mut sync, _cache) = sync();
    let ticket = sync.begin_fetch();
    sync.resolve_fetch(ticket, Ok(Some(user("u-1"))));

    let state = sync.apply_event(&AuthEvent::refreshed(Some(user("u-1")))).unwrap();
    assert_eq!(state.user_id(), Some("u-1"));
    assert_eq!(AuthEvent::refreshed(Some(user("u-1"))).kind, AuthEventKind::TokenRefreshed);
}
