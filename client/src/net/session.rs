//! Session service capability consumed by the view controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller only ever talks to the remote auth/session service through
//! this trait. `AppwriteClient` is the browser implementation; tests supply
//! in-memory fakes.

use super::types::{Identity, Session};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no active session")]
    NoActiveSession,
    #[error("invalid callback: {0}")]
    InvalidCallback(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("identity lookup failed: {0}")]
    Lookup(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Remote operations the view needs from the hosted session service.
///
/// Futures are driven on the single browser event loop, so no `Send` bound.
#[allow(async_fn_in_trait)]
pub trait SessionClient {
    /// Fetch the account behind the current session.
    async fn get_current_user(&self) -> Result<Session, SessionError>;

    /// Exchange OAuth callback parameters for a session.
    async fn create_session_from_callback(&self, user_id: &str, secret: &str) -> Result<(), SessionError>;

    /// Produce the provider authorization URL the browser should visit.
    async fn create_oauth_authorization_url(
        &self,
        provider: &str,
        success_url: &str,
        failure_url: &str,
        scopes: &[&str],
    ) -> Result<String, SessionError>;

    /// Invalidate the current session.
    async fn delete_current_session(&self) -> Result<(), SessionError>;

    /// List the current account's identities for `provider`.
    async fn list_identities(&self, provider: &str) -> Result<Vec<Identity>, SessionError>;
}
