//! Appwrite-compatible REST implementation of [`SessionClient`].
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, sending the session
//! cookie (`credentials: include`) and the project header.
//! Server-side (SSR): stubs returning `Transport` errors since these endpoints
//! are only meaningful in the browser.
//!
//! COOKIE FALLBACK
//! ===============
//! When the service lives on another site and the browser drops its
//! third-party session cookie, the service echoes the session in an
//! `X-Fallback-Cookies` response header. That value is kept in the key-value
//! store under `cookieFallback`, sent back on every request, and forgotten on
//! logout.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses are mapped onto [`SessionError`] using the service's
//! JSON error body when one is present, so alerts carry the service message.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "appwrite_test.rs"]
mod appwrite_test;

use std::rc::Rc;

use url::Url;

use super::session::{SessionClient, SessionError};
#[cfg(any(test, feature = "hydrate"))]
use super::types::ServiceErrorBody;
use super::types::{Identity, Session};
use crate::config::ServiceConfig;
use crate::util::browser::{KeyValueStore, LocalStorage};

#[cfg(feature = "hydrate")]
const PROJECT_HEADER: &str = "X-Appwrite-Project";
#[cfg(feature = "hydrate")]
const FALLBACK_COOKIES_HEADER: &str = "X-Fallback-Cookies";

/// Store key holding the last `X-Fallback-Cookies` value.
pub const COOKIE_FALLBACK_KEY: &str = "cookieFallback";

/// Thin configured handle to the hosted session service.
#[derive(Clone)]
pub struct AppwriteClient {
    config: ServiceConfig,
    store: Rc<dyn KeyValueStore>,
}

impl AppwriteClient {
    /// Client persisting the cookie fallback in `localStorage`.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_store(config, Rc::new(LocalStorage))
    }

    pub fn with_store(config: ServiceConfig, store: Rc<dyn KeyValueStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Session fallback to send as `X-Fallback-Cookies`, if one was issued.
    pub fn fallback_cookies(&self) -> Option<String> {
        self.store.get(COOKIE_FALLBACK_KEY).filter(|v| !v.is_empty())
    }

    /// Keep a fallback value returned by the service; absent or empty headers
    /// leave the stored value alone.
    pub fn remember_fallback_cookies(&self, header: Option<&str>) {
        if let Some(value) = header.filter(|v| !v.is_empty()) {
            self.store.set(COOKIE_FALLBACK_KEY, value);
        }
    }

    pub fn forget_fallback_cookies(&self) {
        self.store.remove(COOKIE_FALLBACK_KEY);
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.endpoint)
    }

    /// `GET /account/identities` filtered to a single provider.
    #[cfg(any(test, feature = "hydrate"))]
    pub(crate) fn identities_url(&self, provider: &str) -> Result<String, SessionError> {
        let mut url = Url::parse(&self.endpoint_url("/account/identities"))
            .map_err(|e| SessionError::Lookup(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("queries[0]", &provider_equal_query(provider));
        Ok(url.into())
    }

    /// Authorization URL for the provider's OAuth redirect; the service
    /// bounces back to `success_url`/`failure_url` when the dance finishes.
    pub(crate) fn oauth_authorization_url(
        &self,
        provider: &str,
        success_url: &str,
        failure_url: &str,
        scopes: &[&str],
    ) -> Result<String, SessionError> {
        if provider.is_empty() || !provider.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(SessionError::Provider(format!("unsupported provider name '{provider}'")));
        }
        let mut url = Url::parse(&self.endpoint_url(&format!("/account/sessions/oauth2/{provider}")))
            .map_err(|e| SessionError::Provider(e.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("success", success_url);
            query.append_pair("failure", failure_url);
            for (idx, scope) in scopes.iter().enumerate() {
                query.append_pair(&format!("scopes[{idx}]"), scope);
            }
            query.append_pair("project", &self.config.project_id);
        }
        Ok(url.into())
    }
}

/// JSON query selecting identities whose `provider` equals `provider`.
#[cfg(any(test, feature = "hydrate"))]
fn provider_equal_query(provider: &str) -> String {
    serde_json::json!({
        "method": "equal",
        "attribute": "provider",
        "values": [provider],
    })
    .to_string()
}

/// Human-readable failure text, preferring the service's own message.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn failure_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ServiceErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.describe())
        .unwrap_or_else(|| format!("request failed: {status}"))
}

/// Map a non-2xx account response; 401 means there is no usable session.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn account_status_error(status: u16, body: &str) -> SessionError {
    if status == 401 {
        SessionError::NoActiveSession
    } else {
        SessionError::Transport(failure_message(status, body))
    }
}

#[cfg(feature = "hydrate")]
impl AppwriteClient {
    fn prepare(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        let builder = builder
            .header(PROJECT_HEADER, &self.config.project_id)
            .credentials(web_sys::RequestCredentials::Include);
        match self.fallback_cookies() {
            Some(cookies) => builder.header(FALLBACK_COOKIES_HEADER, &cookies),
            None => builder,
        }
    }

    /// Send `request` and record any session fallback the service returns.
    async fn send(&self, request: gloo_net::http::Request) -> Result<gloo_net::http::Response, gloo_net::Error> {
        let resp = request.send().await?;
        self.remember_fallback_cookies(resp.headers().get(FALLBACK_COOKIES_HEADER).as_deref());
        Ok(resp)
    }
}

#[cfg(feature = "hydrate")]
fn transport(err: &gloo_net::Error) -> SessionError {
    SessionError::Transport(err.to_string())
}

impl SessionClient for AppwriteClient {
    async fn get_current_user(&self) -> Result<Session, SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let url = self.endpoint_url("/account");
            let request = self.prepare(gloo_net::http::Request::get(&url)).build().map_err(|e| transport(&e))?;
            let resp = self.send(request).await.map_err(|e| transport(&e))?;
            if !resp.ok() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(account_status_error(status, &body));
            }
            resp.json::<Session>().await.map_err(|e| transport(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(SessionError::Transport("not available on server".to_owned()))
        }
    }

    async fn create_session_from_callback(&self, user_id: &str, secret: &str) -> Result<(), SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let url = self.endpoint_url("/account/sessions/token");
            let payload = serde_json::json!({ "userId": user_id, "secret": secret });
            let request = self
                .prepare(gloo_net::http::Request::post(&url))
                .json(&payload)
                .map_err(|e| transport(&e))?;
            let resp = self.send(request).await.map_err(|e| transport(&e))?;
            if !resp.ok() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(SessionError::InvalidCallback(failure_message(status, &body)));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (user_id, secret);
            Err(SessionError::Transport("not available on server".to_owned()))
        }
    }

    async fn create_oauth_authorization_url(
        &self,
        provider: &str,
        success_url: &str,
        failure_url: &str,
        scopes: &[&str],
    ) -> Result<String, SessionError> {
        self.oauth_authorization_url(provider, success_url, failure_url, scopes)
    }

    async fn delete_current_session(&self) -> Result<(), SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let url = self.endpoint_url("/account/sessions/current");
            let request = self.prepare(gloo_net::http::Request::delete(&url)).build().map_err(|e| transport(&e))?;
            let sent = self.send(request).await;
            // The local session is gone whatever the service answered.
            self.forget_fallback_cookies();
            let resp = sent.map_err(|e| transport(&e))?;
            if !resp.ok() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(account_status_error(status, &body));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(SessionError::Transport("not available on server".to_owned()))
        }
    }

    async fn list_identities(&self, provider: &str) -> Result<Vec<Identity>, SessionError> {
        #[cfg(feature = "hydrate")]
        {
            let url = self.identities_url(provider)?;
            let request = self
                .prepare(gloo_net::http::Request::get(&url))
                .build()
                .map_err(|e| SessionError::Lookup(e.to_string()))?;
            let resp = self.send(request).await.map_err(|e| SessionError::Lookup(e.to_string()))?;
            if !resp.ok() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                return Err(match status {
                    401 => SessionError::NoActiveSession,
                    _ => SessionError::Lookup(failure_message(status, &body)),
                });
            }
            let list: super::types::IdentityList =
                resp.json().await.map_err(|e| SessionError::Lookup(e.to_string()))?;
            Ok(list.identities)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = provider;
            Err(SessionError::Transport("not available on server".to_owned()))
        }
    }
}
