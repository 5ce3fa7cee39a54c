//! Finance section page (`/:section`).
//!
//! Section widgets (lists, charts, forms) are mounted here by their feature
//! modules; this page owns the heading and the compose toggle driven by the
//! `?compose=1` query the quick-add overlay links to.

use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::components::nav::FinanceSection;

#[component]
pub fn SectionPage() -> impl IntoView {
    let params = use_params_map();
    let query = use_query_map();

    let section = move || params.with(|p| p.get("section").and_then(|slug| FinanceSection::from_slug(&slug)));
    let composing = move || query.with(|q| q.get("compose").is_some_and(|v| v == "1"));

    move || match section() {
        Some(section) => view! {
            <section class="section-page">
                <header class="section-page__header">
                    <h1>{section.label()}</h1>
                    <a class="btn btn--primary" href=section.compose_href()>
                        {section.quick_add_label()}
                    </a>
                </header>
                <Show when=composing>
                    <div class="section-page__compose" data-section=section.slug()></div>
                </Show>
                <div class="section-page__body" data-section=section.slug()></div>
            </section>
        }
        .into_any(),
        None => view! {
            <section class="section-page section-page--missing">
                <h1>"Page not found."</h1>
                <a href="/">"Back to overview"</a>
            </section>
        }
        .into_any(),
    }
}
