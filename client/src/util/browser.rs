//! Narrow browser capabilities: address bar, localStorage, blocking alerts.
//!
//! SYSTEM CONTEXT
//! ==============
//! The view controller never touches `window` directly. It is handed these
//! traits so the callback/session/avatar sequence can run against in-memory
//! fakes in tests. The `Browser*` implementations below are hydrate-only and
//! no-op during SSR, like the other web-sys glue in this crate.

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use url::Url;

/// Read and rewrite the current page address.
pub trait Location {
    /// Value of query parameter `name`, if present.
    fn query_param(&self, name: &str) -> Option<String>;
    /// `origin + pathname`, without query or fragment.
    fn origin_and_path(&self) -> String;
    /// Drop the query string from the visible address without reloading.
    fn clear_query(&self);
    /// Leave the application for `url`.
    fn navigate(&self, url: &str);
}

/// Synchronous string key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Blocking, user-visible failure notice.
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Look up query parameter `name` in an absolute `href`.
pub fn query_param_from_href(href: &str, name: &str) -> Option<String> {
    Url::parse(href)
        .ok()?
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Strip query and fragment from an absolute `href`.
pub fn origin_and_path_from_href(href: &str) -> Option<String> {
    let mut url = Url::parse(href).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    Some(url.into())
}

/// `window.location` + `window.history`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocation;

impl BrowserLocation {
    #[cfg(feature = "hydrate")]
    fn href() -> Option<String> {
        web_sys::window()?.location().href().ok()
    }
}

impl Location for BrowserLocation {
    fn query_param(&self, name: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            query_param_from_href(&Self::href()?, name)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = name;
            None
        }
    }

    fn origin_and_path(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            Self::href()
                .and_then(|href| origin_and_path_from_href(&href))
                .unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn clear_query(&self) {
        #[cfg(feature = "hydrate")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Ok(path) = window.location().pathname() else {
                return;
            };
            if let Ok(history) = window.history() {
                let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
            }
        }
    }

    fn navigate(&self, url: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(url);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
        }
    }
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// `window.alert`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowAlert;

impl Notifier for WindowAlert {
    fn alert(&self, message: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = message;
        }
    }
}

/// Whether an event's target sits inside an element matching `selector`.
///
/// Only caller is the window click listener in `pages::home`, which feeds the
/// result to [`crate::state::view::ViewState::dismiss_menu`]; the open/closed
/// decision lives there and is covered by `view_test.rs`. This function is
/// just the DOM hit-test (`Element::closest`) and needs a real document.
#[cfg(feature = "hydrate")]
pub fn event_within(ev: &web_sys::Event, selector: &str) -> bool {
    use wasm_bindgen::JsCast;

    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}
