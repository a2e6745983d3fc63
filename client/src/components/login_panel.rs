//! Anonymous landing view with the single login call-to-action.

use leptos::prelude::*;

use crate::state::view::ViewState;

/// Landing header plus the provider login button.
///
/// The button is disabled and shows a spinner while the authorization URL
/// request is in flight.
#[component]
pub fn LoginPanel(view_state: RwSignal<ViewState>, on_login: Callback<()>) -> impl IntoView {
    let in_flight = move || view_state.get().oauth_in_flight;

    view! {
        <div class="container">
            <div class="header">
                <div class="logo">
                    <span class="bracket">"<"</span>
                    <span class="tag">"App"</span>
                    <span class="bracket">"/>"</span>
                </div>
                <p class="subtitle">"Leptos + Appwrite"</p>
            </div>

            <div class="form">
                <button
                    type="button"
                    class="btn-oauth"
                    disabled=in_flight
                    on:click=move |_| on_login.run(())
                >
                    <Show when=in_flight fallback=|| view! { <span>"Login with Alibaba"</span> }>
                        <div class="loading-spinner"></div>
                        <span>"Connecting..."</span>
                    </Show>
                </button>
            </div>
        </div>
    }
}
