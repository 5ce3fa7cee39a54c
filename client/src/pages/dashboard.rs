//! Dashboard subtree root.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server guard has already admitted this request. This component picks
//! the shell for nested routes and sends the user back to `/login` when a
//! later auth event leaves them signed out.

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;

use crate::components::auth_provider::use_auth;
use crate::components::layout_selector::LayoutSelector;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn DashboardLayout() -> impl IntoView {
    install_unauth_redirect(use_auth(), use_navigate());

    view! {
        <LayoutSelector>
            <Outlet/>
        </LayoutSelector>
    }
}
