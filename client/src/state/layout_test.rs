use super::*;
use crate::util::ui_persistence::MemoryStore;

// =============================================================
// SelectorState
// =============================================================

#[test]
fn selector_starts_unmounted_and_renders_nothing() {
    let state = SelectorState::default();
    assert_eq!(state, SelectorState::Unmounted);
    assert_eq!(state.shell(), None);
    assert!(!state.is_mounted());
}

#[test]
fn device_observations_before_mount_are_ignored() {
    let state = SelectorState::Unmounted.observe(true).observe(false);
    assert_eq!(state, SelectorState::Unmounted);
    assert_eq!(state.shell(), None);
}

#[test]
fn mount_then_observe_picks_exactly_one_shell() {
    let mounted = SelectorState::Unmounted.mount();
    assert_eq!(mounted, SelectorState::Mounted { shell: None });
    assert_eq!(mounted.shell(), None);

    assert_eq!(mounted.observe(true).shell(), Some(ShellKind::Mobile));
    assert_eq!(mounted.observe(false).shell(), Some(ShellKind::Desktop));
}

#[test]
fn mount_is_irreversible_and_idempotent() {
    let chosen = SelectorState::Unmounted.mount().observe(true);
    assert_eq!(chosen.mount(), chosen);
    assert!(chosen.mount().is_mounted());
}

#[test]
fn device_flip_after_mount_switches_shell() {
    let state = SelectorState::Unmounted.mount().observe(false);
    assert_eq!(state.shell(), Some(ShellKind::Desktop));
    let state = state.observe(true);
    assert_eq!(state.shell(), Some(ShellKind::Mobile));
    assert!(state.is_mounted());
}

// =============================================================
// LayoutPreference
// =============================================================

#[test]
fn missing_preference_defaults_to_expanded() {
    let store = MemoryStore::new();
    let pref = LayoutPreference::load(&store);
    assert!(!pref.collapsed);
    assert_eq!(pref.color, None);
    assert_eq!(pref.accent(), DEFAULT_ACCENT_COLOR);
    assert_eq!(pref.content_inset_px(), SIDEBAR_EXPANDED_WIDTH_PX);
}

#[test]
fn toggle_round_trips_through_store() {
    let store = MemoryStore::new();
    let mut pref = LayoutPreference::load(&store);
    pref.toggle_collapsed(&store);
    assert!(pref.collapsed);

    let reloaded = LayoutPreference::load(&store);
    assert!(reloaded.collapsed);
    assert_eq!(reloaded.content_inset_px(), SIDEBAR_COLLAPSED_WIDTH_PX);

    let mut reloaded = reloaded;
    reloaded.toggle_collapsed(&store);
    assert!(!LayoutPreference::load(&store).collapsed);
}

#[test]
fn color_round_trips_and_clears() {
    let store = MemoryStore::new();
    let mut pref = LayoutPreference::default();
    pref.set_color(Some("#059669".to_owned()), &store);
    assert_eq!(LayoutPreference::load(&store).accent(), "#059669");

    pref.set_color(None, &store);
    assert_eq!(LayoutPreference::load(&store).color, None);
}

#[test]
fn corrupt_values_fall_back_to_defaults() {
    let store = MemoryStore::new();
    store.set(SIDEBAR_COLLAPSED_KEY, "not-json");
    store.set(SIDEBAR_COLOR_KEY, "\"\"");
    assert_eq!(LayoutPreference::load(&store), LayoutPreference::default());
}

#[test]
fn clear_layout_storage_removes_all_three_keys() {
    let store = MemoryStore::new();
    for key in LAYOUT_STORAGE_KEYS {
        store.set(key, "true");
    }
    store.set("unrelated", "1");

    clear_layout_storage(&store);

    for key in LAYOUT_STORAGE_KEYS {
        assert_eq!(store.get(key), None, "{key} should be cleared");
    }
    assert_eq!(store.get("unrelated").as_deref(), Some("1"));
}

#[test]
fn shell_kind_for_device() {
    assert_eq!(ShellKind::for_device(true), ShellKind::Mobile);
    assert_eq!(ShellKind::for_device(false), ShellKind::Desktop);
}

// =============================================================
// MobileOverlay
// =============================================================

#[test]
fn mobile_overlay_starts_closed() {
    assert_eq!(MobileOverlay::default(), MobileOverlay::Closed);
    assert!(!MobileOverlay::default().confirms_sign_out());
}

#[test]
fn avatar_tap_opens_account_sheet_instead_of_signing_out() {
    let overlay = MobileOverlay::Closed.toggle_account();
    assert_eq!(overlay, MobileOverlay::Account);
    assert!(overlay.confirms_sign_out());
    assert_eq!(overlay.toggle_account(), MobileOverlay::Closed);
}

#[test]
fn quick_add_and_account_sheet_are_exclusive() {
    let overlay = MobileOverlay::Closed.toggle_quick_add();
    assert_eq!(overlay, MobileOverlay::QuickAdd);
    assert!(!overlay.confirms_sign_out());
    assert_eq!(overlay.toggle_account(), MobileOverlay::Account);
    assert_eq!(MobileOverlay::Account.toggle_quick_add(), MobileOverlay::Closed);
}
