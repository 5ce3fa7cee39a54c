//! # client
//!
//! Leptos + WASM frontend for the Finboard finance dashboard.
//!
//! This crate owns the session and layout plumbing around page content: the
//! auth session provider and user cache, device-class detection, the layout
//! selector and its mobile/desktop shells, plus the login and layout-reset
//! routes. Finance widgets mount inside the section pages.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging, start the session refresh loop, and
/// hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    net::auth_client::spawn_refresh_loop();
    leptos::mount::hydrate_body(app::App);
}
