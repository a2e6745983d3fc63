//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid PORT value: {0:?}")]
    InvalidPort(String),
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Overrides the Leptos `site-root` that `/pkg` assets are served from.
    pub site_root: Option<PathBuf>,
}

impl ServerConfig {
    /// Build from `PORT` (default 3000) and optional `SITE_ROOT`.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ServerError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let site_root = var("SITE_ROOT").filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Ok(Self { port, site_root })
    }
}
