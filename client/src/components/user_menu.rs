//! Account avatar button and dropdown menu.

use leptos::prelude::*;

use crate::state::view::ViewState;

/// Selector for the region whose clicks do not dismiss the dropdown.
pub const USER_MENU_SELECTOR: &str = ".user-menu";

/// Avatar (image or initials) that toggles a dropdown with name, email and logout.
#[component]
pub fn UserMenu(view_state: RwSignal<ViewState>, on_logout: Callback<()>) -> impl IntoView {
    let name = move || view_state.with(|s| s.display_name().unwrap_or_default().to_owned());
    let email = move || view_state.with(|s| s.user.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let initials = move || view_state.with(ViewState::initials);
    let avatar_url = move || view_state.with(|s| s.avatar_url.clone());

    view! {
        <div class="user-menu">
            <button class="avatar-btn" on:click=move |_| view_state.update(ViewState::toggle_menu)>
                {move || match avatar_url() {
                    Some(src) => {
                        view! {
                            <img
                                src=src
                                alt=name
                                class="avatar"
                                on:error=move |_| view_state.update(ViewState::clear_avatar)
                            />
                        }
                            .into_any()
                    }
                    None => view! { <div class="avatar avatar-placeholder">{initials}</div> }.into_any(),
                }}
            </button>
            <Show when=move || view_state.get().menu_open>
                <div class="menu-dropdown">
                    <div class="user-info">
                        <div class="user-name">{name}</div>
                        <div class="user-email">{email}</div>
                    </div>
                    <div class="menu-divider"></div>
                    <button class="btn-logout" on:click=move |_| on_logout.run(())>
                        <span>">"</span>
                        " Logout"
                    </button>
                </div>
            </Show>
        </div>
    }
}
