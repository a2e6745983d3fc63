//! In-memory stand-ins for the session service and browser capabilities.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::net::session::{SessionClient, SessionError};
use crate::net::types::{Identity, Session};
use crate::util::browser::{KeyValueStore, Location, Notifier, origin_and_path_from_href, query_param_from_href};

/// Ordered record of remote calls and address-bar rewrites.
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn session(user_id: &str, name: &str, email: &str) -> Session {
    Session { user_id: user_id.to_owned(), name: name.to_owned(), email: email.to_owned() }
}

pub fn identity(provider_uid: &str) -> Identity {
    Identity {
        id: format!("identity-{provider_uid}"),
        user_id: "u1".to_owned(),
        provider: "alibaba".to_owned(),
        provider_uid: provider_uid.to_owned(),
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.raw(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

pub struct FakeLocation {
    pub href: RefCell<String>,
    pub navigated_to: RefCell<Option<String>>,
    log: CallLog,
}

impl FakeLocation {
    pub fn new(href: &str, log: CallLog) -> Self {
        Self { href: RefCell::new(href.to_owned()), navigated_to: RefCell::new(None), log }
    }
}

impl Location for FakeLocation {
    fn query_param(&self, name: &str) -> Option<String> {
        query_param_from_href(&self.href.borrow(), name)
    }

    fn origin_and_path(&self) -> String {
        origin_and_path_from_href(&self.href.borrow()).unwrap_or_default()
    }

    fn clear_query(&self) {
        self.log.borrow_mut().push("clear_query".to_owned());
        let stripped = self.origin_and_path();
        *self.href.borrow_mut() = stripped;
    }

    fn navigate(&self, url: &str) {
        *self.navigated_to.borrow_mut() = Some(url.to_owned());
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub alerts: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }
}

/// Scripted session service. Each operation returns its configured result.
pub struct FakeSessionClient {
    pub current_user: Result<Session, SessionError>,
    pub callback: Result<(), SessionError>,
    pub oauth_url: Result<String, SessionError>,
    pub delete: Result<(), SessionError>,
    pub identities: Result<Vec<Identity>, SessionError>,
    /// Runs inside `list_identities` before it resolves, to interleave events.
    pub during_lookup: RefCell<Option<Box<dyn FnOnce()>>>,
    pub identity_lookups: Cell<usize>,
    log: CallLog,
}

impl FakeSessionClient {
    pub fn new(log: CallLog) -> Self {
        Self {
            current_user: Err(SessionError::NoActiveSession),
            callback: Ok(()),
            oauth_url: Ok("https://baas.test/v1/account/sessions/oauth2/alibaba?project=p".to_owned()),
            delete: Ok(()),
            identities: Ok(Vec::new()),
            during_lookup: RefCell::new(None),
            identity_lookups: Cell::new(0),
            log,
        }
    }

    fn record(&self, call: String) {
        self.log.borrow_mut().push(call);
    }
}

impl SessionClient for FakeSessionClient {
    async fn get_current_user(&self) -> Result<Session, SessionError> {
        self.record("get_current_user".to_owned());
        self.current_user.clone()
    }

    async fn create_session_from_callback(&self, user_id: &str, secret: &str) -> Result<(), SessionError> {
        self.record(format!("create_session_from_callback({user_id},{secret})"));
        self.callback.clone()
    }

    async fn create_oauth_authorization_url(
        &self,
        provider: &str,
        success_url: &str,
        failure_url: &str,
        scopes: &[&str],
    ) -> Result<String, SessionError> {
        self.record(format!(
            "create_oauth_authorization_url({provider},{success_url},{failure_url},{})",
            scopes.join(" ")
        ));
        self.oauth_url.clone()
    }

    async fn delete_current_session(&self) -> Result<(), SessionError> {
        self.record("delete_current_session".to_owned());
        self.delete.clone()
    }

    async fn list_identities(&self, provider: &str) -> Result<Vec<Identity>, SessionError> {
        self.record(format!("list_identities({provider})"));
        self.identity_lookups.set(self.identity_lookups.get() + 1);
        if let Some(hook) = self.during_lookup.borrow_mut().take() {
            hook();
        }
        self.identities.clone()
    }
}
