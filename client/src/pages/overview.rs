//! Overview landing page inside the dashboard shell.

#[cfg(test)]
#[path = "overview_test.rs"]
mod overview_test;

use leptos::prelude::*;

use crate::components::auth_provider::use_auth;
use crate::components::nav::FinanceSection;
use crate::state::auth::AuthState;

/// Greeting line for the overview header.
fn greeting(state: &AuthState) -> String {
    match &state.user {
        Some(user) => {
            let label = user.display_label();
            let first = label.split('@').next().unwrap_or(label);
            let first = first.split_whitespace().next().unwrap_or(first);
            format!("Welcome back, {first}")
        }
        None if state.loading => "Loading your workspace...".to_owned(),
        None => "Welcome".to_owned(),
    }
}

#[component]
pub fn OverviewPage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <section class="overview">
            <h1 class="overview__greeting">{move || auth.with(greeting)}</h1>
            <div class="overview__cards">
                {FinanceSection::ALL
                    .into_iter()
                    .map(|section| {
                        view! {
                            <a class="overview-card" href=section.href()>
                                <span class="overview-card__glyph" aria-hidden="true">{section.glyph()}</span>
                                <span class="overview-card__label">{section.label()}</span>
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}
