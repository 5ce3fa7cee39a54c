//! Layout reset route (`/reset-layout`).
//!
//! Clears every persisted layout key, then forces a full navigation to the
//! dashboard root so the shells re-activate from defaults.

use leptos::prelude::*;

use crate::state::layout::clear_layout_storage;
use crate::util::ui_persistence::LocalStore;

#[component]
pub fn ResetLayoutPage() -> impl IntoView {
    Effect::new(move || {
        clear_layout_storage(&LocalStore);
        log::info!("layout preferences cleared");
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().replace("/");
            }
        }
    });

    view! {
        <div class="reset-layout">
            <p>"Resetting layout..."</p>
        </div>
    }
}
