//! Root application component with routing and the auth provider.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::components::auth_provider::AuthProvider;
use crate::pages::{
    dashboard::DashboardLayout, login::LoginPage, overview::OverviewPage, reset_layout::ResetLayoutPage,
    section::SectionPage,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// The auth provider sits above the router so identity survives route
/// changes. `/login` and `/reset-layout` are outside the dashboard subtree;
/// everything else renders inside a layout shell.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/finboard.css"/>
        <Title text="Finboard"/>

        <AuthProvider>
            <Router>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("reset-layout") view=ResetLayoutPage/>
                    <ParentRoute path=StaticSegment("") view=DashboardLayout>
                        <Route path=StaticSegment("") view=OverviewPage/>
                        <Route path=ParamSegment("section") view=SectionPage/>
                    </ParentRoute>
                </Routes>
            </Router>
        </AuthProvider>
    }
}
