//! View controller: session bootstrap, avatar resolution, login, logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each public method is one event handler's worth of work, run to completion
//! on the browser event loop via `spawn_local`. Between `.await` points the
//! only shared state is the [`ViewState`] cell, updated in one step at a time.
//!
//! BOOTSTRAP
//! =========
//! `Init -> (CallbackDetected | NoCallback) -> Resolving -> {Authenticated, Anonymous}`.
//! Callback parameters (`userId`, `secret`) are consumed first and always
//! stripped from the address bar; `get_current_user` then decides the
//! terminal phase. No failure escapes: the worst outcome is the anonymous view.
//!
//! ERROR HANDLING
//! ==============
//! Callback and login failures raise a blocking alert. Session misses, identity
//! lookup errors and logout failures are logged and absorbed.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::rc::Rc;

use leptos::logging::{log, warn};
use leptos::prelude::RwSignal;

use crate::config::{OAUTH_PROVIDER, OAUTH_SCOPES, ServiceConfig};
use crate::net::appwrite::AppwriteClient;
use crate::net::session::SessionClient;
use crate::state::avatar_cache::{self, AvatarCacheEntry};
use crate::state::view::{StateCell, ViewPhase, ViewState};
use crate::util::browser::{BrowserLocation, KeyValueStore, LocalStorage, Location, Notifier, WindowAlert};
use crate::util::clock;

const CALLBACK_USER_ID_PARAM: &str = "userId";
const CALLBACK_SECRET_PARAM: &str = "secret";

/// UI events that each run the controller as their own local task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowserAction {
    Start,
    Login,
    Logout,
}

/// Run `action` against the browser-wired controller on the local executor.
/// During SSR this is a no-op; the bootstrap only runs once hydrated.
pub fn spawn_in_browser(config: &ServiceConfig, state: RwSignal<ViewState>, action: BrowserAction) {
    #[cfg(feature = "hydrate")]
    {
        let controller = ViewController::for_browser(config, Rc::new(state));
        leptos::task::spawn_local(async move {
            match action {
                BrowserAction::Start => {
                    controller.start().await;
                }
                BrowserAction::Login => {
                    controller.begin_login().await;
                }
                BrowserAction::Logout => controller.logout().await,
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, state, action);
    }
}

/// How the avatar step ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvatarSource {
    /// Valid cache entry; no network call.
    Cached,
    /// Fresh identity lookup; cache rewritten.
    Fetched,
    /// Nothing usable; the UI shows initials.
    Initials,
    /// The user changed or logged out while the lookup was in flight.
    Discarded,
}

/// Browser-facing capabilities the controller is handed at construction.
#[derive(Clone)]
pub struct Ports {
    pub location: Rc<dyn Location>,
    pub store: Rc<dyn KeyValueStore>,
    pub notifier: Rc<dyn Notifier>,
    pub clock: fn() -> i64,
}

impl Ports {
    pub fn browser() -> Self {
        Self {
            location: Rc::new(BrowserLocation),
            store: Rc::new(LocalStorage),
            notifier: Rc::new(WindowAlert),
            clock: clock::now_ms,
        }
    }
}

pub struct ViewController<C> {
    client: Rc<C>,
    ports: Ports,
    state: Rc<dyn StateCell>,
}

impl<C> Clone for ViewController<C> {
    fn clone(&self) -> Self {
        Self { client: Rc::clone(&self.client), ports: self.ports.clone(), state: Rc::clone(&self.state) }
    }
}

impl ViewController<AppwriteClient> {
    /// Controller wired to `window`, localStorage and the configured service.
    pub fn for_browser(config: &ServiceConfig, state: Rc<dyn StateCell>) -> Self {
        let ports = Ports::browser();
        let client = AppwriteClient::with_store(config.clone(), Rc::clone(&ports.store));
        Self::new(client, ports, state)
    }
}

impl<C: SessionClient> ViewController<C> {
    pub fn new(client: C, ports: Ports, state: Rc<dyn StateCell>) -> Self {
        Self { client: Rc::new(client), ports, state }
    }

    pub fn state(&self) -> ViewState {
        self.state.snapshot()
    }

    /// Page-load entry point: bootstrap the session, then resolve the avatar
    /// if a user is known.
    pub async fn start(&self) -> ViewPhase {
        let phase = self.bootstrap().await;
        if phase == ViewPhase::Authenticated {
            self.resolve_avatar().await;
        }
        phase
    }

    /// Run the bootstrap state machine to a terminal phase.
    pub async fn bootstrap(&self) -> ViewPhase {
        if let Some((user_id, secret)) = self.callback_params() {
            let completed = self.client.create_session_from_callback(&user_id, &secret).await;
            self.ports.location.clear_query();
            if let Err(err) = completed {
                warn!("oauth callback completion failed: {err}");
                self.ports.notifier.alert(&format!("OAuth2 login failed: {err}"));
                self.state.update(ViewState::become_anonymous);
                return ViewPhase::Anonymous;
            }
        }
        self.resolve_current_user().await
    }

    /// Both callback parameters, when present and non-empty.
    fn callback_params(&self) -> Option<(String, String)> {
        let location = &self.ports.location;
        let user_id = location.query_param(CALLBACK_USER_ID_PARAM).filter(|v| !v.is_empty())?;
        let secret = location.query_param(CALLBACK_SECRET_PARAM).filter(|v| !v.is_empty())?;
        Some((user_id, secret))
    }

    async fn resolve_current_user(&self) -> ViewPhase {
        match self.client.get_current_user().await {
            Ok(session) => {
                log!("session active for user {}", session.user_id);
                self.state.update(|s| s.authenticate(session));
                ViewPhase::Authenticated
            }
            Err(err) => {
                log!("no current session: {err}");
                self.state.update(ViewState::become_anonymous);
                ViewPhase::Anonymous
            }
        }
    }

    /// Cache first, then identity lookup, else leave the avatar to initials.
    pub async fn resolve_avatar(&self) -> AvatarSource {
        let snapshot = self.state.snapshot();
        let Some(user) = snapshot.user else {
            return AvatarSource::Initials;
        };
        let epoch = snapshot.session_epoch;
        let store = self.ports.store.as_ref();

        if let Some(url) = avatar_cache::lookup(store, &user.user_id, (self.ports.clock)()) {
            self.state.update(|s| s.avatar_url = Some(url));
            return AvatarSource::Cached;
        }

        let provider_uid = match self.client.list_identities(OAUTH_PROVIDER).await {
            Ok(identities) => identities
                .into_iter()
                .next()
                .map(|identity| identity.provider_uid)
                .filter(|uid| !uid.is_empty()),
            Err(err) => {
                warn!("identity lookup failed: {err}");
                None
            }
        };
        let Some(provider_uid) = provider_uid else {
            return AvatarSource::Initials;
        };

        if !self.state.snapshot().is_current(&user.user_id, epoch) {
            return AvatarSource::Discarded;
        }
        let url = avatar_cache::avatar_url_for(&provider_uid);
        avatar_cache::save(store, &AvatarCacheEntry::new(&user.user_id, &url, (self.ports.clock)()));
        self.state.update(|s| s.avatar_url = Some(url));
        AvatarSource::Fetched
    }

    /// Start the provider redirect. Returns whether the browser was sent away.
    pub async fn begin_login(&self) -> bool {
        let snapshot = self.state.snapshot();
        if snapshot.oauth_in_flight || snapshot.user.is_some() {
            return false;
        }
        self.state.update(|s| s.oauth_in_flight = true);

        let return_url = self.ports.location.origin_and_path();
        let requested = self
            .client
            .create_oauth_authorization_url(OAUTH_PROVIDER, &return_url, &return_url, &OAUTH_SCOPES)
            .await;
        match requested {
            Ok(url) if !url.is_empty() => {
                self.ports.location.navigate(&url);
                true
            }
            Ok(_) => {
                warn!("session service returned an empty authorization url");
                self.state.update(|s| s.oauth_in_flight = false);
                false
            }
            Err(err) => {
                warn!("authorization url request failed: {err}");
                self.ports.notifier.alert(&format!("Login failed: {err}"));
                self.state.update(|s| s.oauth_in_flight = false);
                false
            }
        }
    }

    /// Delete the remote session and clear local user state regardless of
    /// whether the deletion succeeded.
    pub async fn logout(&self) {
        if let Err(err) = self.client.delete_current_session().await {
            warn!("session deletion failed, clearing local state anyway: {err}");
        }
        self.state.update(ViewState::become_anonymous);
        avatar_cache::purge(self.ports.store.as_ref());
    }
}
