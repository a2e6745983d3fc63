//! OAuth landing page: a single-route Leptos app that signs users in through
//! a hosted session service and shows who is logged in.
//!
//! ARCHITECTURE
//! ============
//! - `net`: the session-service trait and its REST client.
//! - `state`: the reactive view state and the avatar cache.
//! - `controller`: bootstrap/login/logout/avatar flows over those seams.
//! - `pages` / `components`: rendering only.
//!
//! Browser-only code is gated behind the `hydrate` feature; the `ssr` build
//! renders the loading shell and never talks to the session service.

pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already initialized: {err}");
    }
    leptos::mount::hydrate_body(app::App);
}
