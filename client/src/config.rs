//! Fixed service configuration for the hosted auth/session backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session client is built once per page load from this configuration.
//! Endpoint and project id are baked in at build time (`APPWRITE_ENDPOINT`,
//! `APPWRITE_PROJECT_ID`) so the WASM bundle and the SSR render agree.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_ENDPOINT: &str = "https://appbuild.space/v1";
pub const DEFAULT_PROJECT_ID: &str = "695e4cbd00290718d335";

/// Identity provider used for login and avatar lookup.
pub const OAUTH_PROVIDER: &str = "alibaba";

/// Scopes requested from the provider during the OAuth redirect.
pub const OAUTH_SCOPES: [&str; 2] = ["read:user", "user:email"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint '{0}': expected an http(s) URL")]
    InvalidEndpoint(String),
    #[error("project id must not be empty")]
    EmptyProjectId,
}

/// Endpoint + project identifier for the remote session service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub project_id: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_owned(), project_id: DEFAULT_PROJECT_ID.to_owned() }
    }
}

impl ServiceConfig {
    /// Validate and normalize an endpoint/project pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the endpoint is not an `http(s)://` URL or
    /// the project id is blank.
    pub fn new(endpoint: &str, project_id: &str) -> Result<Self, ConfigError> {
        let endpoint = endpoint.trim().trim_end_matches('/');
        let parsed = url::Url::parse(endpoint).map_err(|_| ConfigError::InvalidEndpoint(endpoint.to_owned()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidEndpoint(endpoint.to_owned()));
        }

        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(ConfigError::EmptyProjectId);
        }

        Ok(Self { endpoint: endpoint.to_owned(), project_id: project_id.to_owned() })
    }

    /// Build from optional overrides, falling back to the defaults for
    /// whichever value is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a provided override is invalid.
    pub fn from_values(endpoint: Option<&str>, project_id: Option<&str>) -> Result<Self, ConfigError> {
        Self::new(endpoint.unwrap_or(DEFAULT_ENDPOINT), project_id.unwrap_or(DEFAULT_PROJECT_ID))
    }

    /// Read overrides captured from the build environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a build-time override is invalid.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("APPWRITE_ENDPOINT"), option_env!("APPWRITE_PROJECT_ID"))
    }
}
