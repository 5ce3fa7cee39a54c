//! Desktop chrome: collapsible sidebar, header, and content area.
//!
//! DESIGN
//! ======
//! The shell owns [`LayoutPreference`]. It is read once when the shell
//! activates; toggles update the signal and the store together so a fresh
//! activation reads back what the user last chose. Content is inset by the
//! current sidebar width.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::components::auth_provider::use_auth;
use crate::components::nav::{FinanceSection, OVERVIEW_PATH, is_active};
use crate::net::types::Identity;
use crate::state::layout::{ACCENT_PALETTE, DEFAULT_ACCENT_COLOR, LayoutPreference};
use crate::util::auth::sign_out;
use crate::util::dark_mode;
use crate::util::ui_persistence::LocalStore;

#[component]
pub fn DesktopShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let pathname = use_location().pathname;
    let pref = RwSignal::new(LayoutPreference::load(&LocalStore));
    let dark = RwSignal::new(dark_mode::read_preference(&LocalStore));
    dark_mode::apply(dark.get_untracked());

    let on_toggle = move |_| pref.update(|p| p.toggle_collapsed(&LocalStore));
    let on_theme = move |_| dark.set(dark_mode::toggle(dark.get_untracked(), &LocalStore));
    let on_sign_out = move |_| sign_out();

    let shell_style = move || format!("--accent: {};", pref.with(|p| p.accent().to_owned()));
    let sidebar_style = move || format!("width: {}px;", pref.with(LayoutPreference::sidebar_width_px));
    let main_style = move || format!("padding-left: {}px;", pref.with(LayoutPreference::content_inset_px));
    let collapsed = move || pref.with(|p| p.collapsed);

    let nav_link = move |href: String, label: &'static str, glyph: &'static str| {
        let active_href = href.clone();
        view! {
            <a
                href=href
                class="sidebar__link"
                class:sidebar__link--active=move || pathname.with(|p| is_active(p, &active_href))
                title=label
            >
                <span class="sidebar__glyph" aria-hidden="true">{glyph}</span>
                <Show when=move || !collapsed()>
                    <span class="sidebar__label">{label}</span>
                </Show>
            </a>
        }
    };

    let identity_label = move || {
        auth.with(|a| a.user.as_ref().map(|u| u.display_label().to_owned()))
            .unwrap_or_default()
    };
    let initials = move || auth.with(|a| a.user.as_ref().map(Identity::initials)).unwrap_or_default();

    view! {
        <div class="shell shell--desktop" style=shell_style>
            <aside class="sidebar" class:sidebar--collapsed=collapsed style=sidebar_style>
                <div class="sidebar__brand">
                    <span class="sidebar__logo" aria-hidden="true">"◆"</span>
                    <Show when=move || !collapsed()>
                        <span class="sidebar__title">"Finboard"</span>
                    </Show>
                </div>
                <nav class="sidebar__nav">
                    {nav_link(OVERVIEW_PATH.to_owned(), "Overview", "🏠")}
                    {FinanceSection::ALL
                        .into_iter()
                        .map(|section| nav_link(section.href(), section.label(), section.glyph()))
                        .collect::<Vec<_>>()}
                </nav>
                <Show when=move || !collapsed()>
                    <div class="sidebar__palette" role="radiogroup" aria-label="Accent color">
                        {ACCENT_PALETTE
                            .into_iter()
                            .map(|color| {
                                let selected = move || pref.with(|p| p.accent() == color);
                                view! {
                                    <button
                                        class="sidebar__swatch"
                                        class:sidebar__swatch--selected=selected
                                        style=format!("background: {color};")
                                        title=color
                                        on:click=move |_| {
                                            let next = (color != DEFAULT_ACCENT_COLOR).then(|| color.to_owned());
                                            pref.update(|p| p.set_color(next, &LocalStore));
                                        }
                                    ></button>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                </Show>
                <button
                    class="btn sidebar__collapse"
                    on:click=on_toggle
                    title=move || if collapsed() { "Expand sidebar" } else { "Collapse sidebar" }
                >
                    {move || if collapsed() { "»" } else { "«" }}
                </button>
            </aside>

            <div class="shell__main" style=main_style>
                <header class="shell__header toolbar">
                    <span class="toolbar__spacer"></span>
                    <button class="btn toolbar__dark-toggle" on:click=on_theme title="Toggle dark mode">
                        {move || if dark.get() { "☀" } else { "☾" }}
                    </button>
                    <span class="toolbar__avatar" aria-hidden="true">{initials}</span>
                    <span class="toolbar__self">{identity_label}</span>
                    <button class="btn toolbar__logout" on:click=on_sign_out title="Sign out">
                        "Sign out"
                    </button>
                </header>
                <main class="shell__content">{children()}</main>
            </div>
        </div>
    }
}
