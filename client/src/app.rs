//! Root component, HTML shell and route table.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::StaticSegment;
use leptos_router::components::{Route, Router, Routes};

use crate::config::ServiceConfig;
use crate::controller::{BrowserAction, spawn_in_browser};
use crate::pages::home::HomePage;
use crate::state::view::ViewState;

/// Document shell rendered by the SSR host around [`App`].
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

/// Provides the service config and view state, then starts the session
/// bootstrap exactly once per page load.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ServiceConfig::from_build_env().unwrap_or_else(|err| {
        leptos::logging::warn!("invalid build-time service config, using defaults: {err}");
        ServiceConfig::default()
    });
    let view_state = RwSignal::new(ViewState::default());
    provide_context(config.clone());
    provide_context(view_state);

    spawn_in_browser(&config, view_state, BrowserAction::Start);

    view! {
        <Stylesheet id="leptos" href="/pkg/oauth-landing.css"/>
        <Title text="Login"/>
        <Router>
            <main>
                <Routes fallback=|| "Page not found.">
                    <Route path=StaticSegment("") view=HomePage/>
                </Routes>
            </main>
        </Router>
    }
}
