//! Dark mode initialization and toggle.
//!
//! Reads the user's preference from the preference store and applies a
//! `data-theme` attribute to the `<html>` element. Toggle writes back to the
//! store and updates that attribute.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort browser-only behavior; SSR paths
//! safely no-op to keep server rendering deterministic. The key is one of the
//! layout keys cleared by the reset route.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use super::ui_persistence::{PreferenceStore, load_json, save_json};

pub const STORAGE_KEY: &str = "finboard.theme.dark";

/// Read the dark mode preference.
///
/// Returns the stored value when present, otherwise the system color-scheme
/// preference in the browser and `false` elsewhere.
pub fn read_preference(store: &impl PreferenceStore) -> bool {
    if let Some(stored) = load_json::<bool>(store, STORAGE_KEY) {
        return stored;
    }

    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = doc.document_element() {
                let _ = el.set_attribute("data-theme", if enabled { "dark" } else { "light" });
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = enabled;
    }
}

/// Toggle dark mode, persist the new preference, and return it.
pub fn toggle(current: bool, store: &impl PreferenceStore) -> bool {
    let next = !current;
    apply(next);
    save_json(store, STORAGE_KEY, &next);
    next
}
