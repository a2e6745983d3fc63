//! The single landing route: loading, anonymous and authenticated views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Bootstrap is started once by `App`; this page reacts to the resulting
//! `ViewState` phase and forwards login/logout clicks to the controller.

use leptos::prelude::*;

use crate::components::login_panel::LoginPanel;
use crate::components::user_menu::UserMenu;
use crate::config::ServiceConfig;
use crate::controller::{BrowserAction, spawn_in_browser};
use crate::state::view::{ViewPhase, ViewState};

#[component]
pub fn HomePage() -> impl IntoView {
    let view_state = expect_context::<RwSignal<ViewState>>();
    let config = expect_context::<ServiceConfig>();

    let on_login = Callback::new({
        let config = config.clone();
        move |()| spawn_in_browser(&config, view_state, BrowserAction::Login)
    });
    let on_logout = Callback::new(move |()| spawn_in_browser(&config, view_state, BrowserAction::Logout));

    // Close the account menu on any click outside it.
    #[cfg(feature = "hydrate")]
    {
        use crate::components::user_menu::USER_MENU_SELECTOR;

        let listener = window_event_listener(leptos::ev::click, move |ev| {
            if !view_state.get_untracked().menu_open {
                return;
            }
            let inside = crate::util::browser::event_within(&ev, USER_MENU_SELECTOR);
            view_state.update(|s| {
                s.dismiss_menu(inside);
            });
        });
        on_cleanup(move || listener.remove());
    }

    let phase = Memo::new(move |_| view_state.with(ViewState::phase));
    let name = move || view_state.with(|s| s.display_name().unwrap_or_default().to_owned());

    move || match phase.get() {
        ViewPhase::Loading => view! {
            <div class="container">
                <div class="loading">
                    <div class="loading-dot"></div>
                    <span>"Initializing..."</span>
                </div>
            </div>
        }
        .into_any(),
        ViewPhase::Anonymous => view! { <LoginPanel view_state=view_state on_login=on_login/> }.into_any(),
        ViewPhase::Authenticated => view! {
            <div class="app-wrapper">
                <UserMenu view_state=view_state on_logout=on_logout/>
                <div class="welcome-section">
                    <div class="status-indicator active"></div>
                    <h1>"> Welcome, " {name}</h1>
                    <p class="info-text">"Session active"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}
