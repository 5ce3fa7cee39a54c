//! Mobile chrome: compact header, bottom navigation, and quick-add overlay.
//!
//! The open overlay (quick add or the account sheet) is the only state this
//! shell owns, and it is never persisted.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::components::auth_provider::use_auth;
use crate::components::nav::{FinanceSection, OVERVIEW_PATH, is_active};
use crate::net::types::Identity;
use crate::state::layout::MobileOverlay;
use crate::util::auth::sign_out;

#[component]
pub fn MobileShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let pathname = use_location().pathname;
    let overlay = RwSignal::new(MobileOverlay::Closed);
    let quick_add_open = move || overlay.get() == MobileOverlay::QuickAdd;
    let close = move || overlay.set(MobileOverlay::Closed);

    let initials = move || auth.with(|a| a.user.as_ref().map(Identity::initials)).unwrap_or_default();
    let identity_label = move || {
        auth.with(|a| a.user.as_ref().map(|u| u.display_label().to_owned()))
            .unwrap_or_default()
    };
    let on_confirm_sign_out = move |_: leptos::ev::MouseEvent| {
        if overlay.get_untracked().confirms_sign_out() {
            close();
            sign_out();
        }
    };

    let tab = move |href: String, label: &'static str, glyph: &'static str| {
        let active_href = href.clone();
        view! {
            <a
                href=href
                class="bottom-nav__tab"
                class:bottom-nav__tab--active=move || pathname.with(|p| is_active(p, &active_href))
            >
                <span class="bottom-nav__glyph" aria-hidden="true">{glyph}</span>
                <span class="bottom-nav__label">{label}</span>
            </a>
        }
    };

    let [first_tab, second_tab, third_tab] = FinanceSection::MOBILE_TABS;

    view! {
        <div class="shell shell--mobile">
            <header class="mobile-header">
                <span class="mobile-header__title">"Finboard"</span>
                <span class="toolbar__spacer"></span>
                <button
                    class="mobile-header__avatar"
                    aria-label="Account"
                    aria-expanded=move || (overlay.get() == MobileOverlay::Account).to_string()
                    on:click=move |_| overlay.update(|o| *o = o.toggle_account())
                >
                    {initials}
                </button>
            </header>

            <main class="shell__content shell__content--mobile">{children()}</main>

            <nav class="bottom-nav">
                {tab(OVERVIEW_PATH.to_owned(), "Overview", "🏠")}
                {tab(first_tab.href(), first_tab.label(), first_tab.glyph())}
                <button
                    class="bottom-nav__add"
                    class:bottom-nav__add--open=quick_add_open
                    aria-label="Quick add"
                    aria-expanded=move || quick_add_open().to_string()
                    on:click=move |_| overlay.update(|o| *o = o.toggle_quick_add())
                >
                    "+"
                </button>
                {tab(second_tab.href(), second_tab.label(), second_tab.glyph())}
                {tab(third_tab.href(), third_tab.label(), third_tab.glyph())}
            </nav>

            <Show when=move || overlay.get() == MobileOverlay::Account>
                <div class="quick-add-backdrop" on:click=move |_| close()>
                    <div class="account-sheet" on:click=move |ev| ev.stop_propagation()>
                        <p class="account-sheet__identity">{identity_label}</p>
                        <button class="btn btn--danger account-sheet__sign-out" on:click=on_confirm_sign_out>
                            "Sign out"
                        </button>
                        <button class="btn account-sheet__cancel" on:click=move |_| close()>
                            "Cancel"
                        </button>
                    </div>
                </div>
            </Show>

            <Show when=quick_add_open>
                <div class="quick-add-backdrop" on:click=move |_| close()>
                    <div class="quick-add" on:click=move |ev| ev.stop_propagation()>
                        <h2 class="quick-add__title">"Quick add"</h2>
                        <ul class="quick-add__list">
                            {FinanceSection::QUICK_ADD
                                .into_iter()
                                .map(|section| {
                                    view! {
                                        <li>
                                            <a
                                                class="quick-add__item"
                                                href=section.compose_href()
                                                on:click=move |_| close()
                                            >
                                                <span aria-hidden="true">{section.glyph()}</span>
                                                {section.quick_add_label()}
                                            </a>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </ul>
                    </div>
                </div>
            </Show>
        </div>
    }
}
