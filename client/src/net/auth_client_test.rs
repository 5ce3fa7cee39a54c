use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

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

// =============================================================
// Event bus
// =============================================================

#[test]
fn emit_reaches_every_listener_in_order() {
    let client = AuthClient::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let seen_a = Arc::clone(&seen);
    let _a = client.on_auth_state_change(move |e| seen_a.lock().unwrap().push(("a", e.kind)));
    let seen_b = Arc::clone(&seen);
    let _b = client.on_auth_state_change(move |e| seen_b.lock().unwrap().push(("b", e.kind)));

    client.emit(&AuthEvent::signed_in(user("u-1")));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![("a", AuthEventKind::SignedIn), ("b", AuthEventKind::SignedIn)]
    );
}

#[test]
fn unsubscribe_stops_delivery() {
    let client = AuthClient::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_cb = Arc::clone(&hits);
    let sub = client.on_auth_state_change(move |_| {
        hits_cb.fetch_add(1, Ordering::SeqCst);
    });

    client.emit(&AuthEvent::signed_out());
    sub.unsubscribe();
    client.emit(&AuthEvent::signed_out());

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(client.listener_count(), 0);
}

#[test]
fn dropping_subscription_unregisters() {
    let client = AuthClient::new();
    {
        let _sub = client.on_auth_state_change(|_| {});
        assert_eq!(client.listener_count(), 1);
    }
    assert_eq!(client.listener_count(), 0);
}

#[test]
fn unsubscribe_only_removes_its_own_listener() {
    let client = AuthClient::new();
    let first = client.on_auth_state_change(|_| {});
    let _second = client.on_auth_state_change(|_| {});
    first.unsubscribe();
    assert_eq!(client.listener_count(), 1);
}

#[test]
fn subscription_outliving_client_drops_cleanly() {
    let client = AuthClient::new();
    let sub = client.on_auth_state_change(|_| {});
    drop(client);
    sub.unsubscribe();
}

#[test]
fn listener_may_subscribe_during_emit() {
    let client = Arc::new(AuthClient::new());
    let inner_client = Arc::clone(&client);
    let held = Arc::new(Mutex::new(Vec::new()));
    let held_cb = Arc::clone(&held);
    let _sub = client.on_auth_state_change(move |_| {
        held_cb.lock().unwrap().push(inner_client.on_auth_state_change(|_| {}));
    });

    client.emit(&AuthEvent::signed_out());
    assert_eq!(client.listener_count(), 2);
}

// =============================================================
// Non-browser transport
// =============================================================

#[test]
fn calls_are_unavailable_outside_the_browser() {
    let client = AuthClient::new();
    let result = block_on_ready(client.get_session());
    assert_eq!(result, Err(AuthClientError::Unavailable));
}

#[test]
fn global_client_is_a_singleton() {
    assert!(std::ptr::eq(client(), client()));
}

/// Poll a future that completes without suspending.
fn block_on_ready<F: std::future::Future>(fut: F) -> F::Output {
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());
    match fut.as_mut().poll(&mut cx) {
        Poll::Ready(out) => out,
        Poll::Pending => panic!("future unexpectedly pending"),
    }
}
