//! Client configuration.
//!
//! Values come from defaults, then `ROUNDTABLE_*` environment variables,
//! then command-line flags applied through the `with_*` setters.
//!
//! # Example
//!
//! ```ignore
//! use roundtable::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()
//!     .with_base_url("http://chat.internal:5000/")
//!     .with_fresh_session();
//! config.validate()?;
//! ```

use std::path::PathBuf;

use uuid::Uuid;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_SESSION_ID: &str = "default";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const ENV_BASE_URL: &str = "ROUNDTABLE_URL";
pub const ENV_SESSION: &str = "ROUNDTABLE_SESSION";
pub const ENV_LOG_FILE: &str = "ROUNDTABLE_LOG_FILE";
pub const ENV_LOG_FILTER: &str = "ROUNDTABLE_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash
    pub base_url: String,
    /// Conversation id sent with every request
    pub session_id: String,
    /// Log destination; `None` disables logging
    pub log_file: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_id: DEFAULT_SESSION_ID.to_string(),
            log_file: default_log_file(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing `/` is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Start a new server-side conversation instead of the default one.
    pub fn with_fresh_session(mut self) -> Self {
        self.session_id = Uuid::new_v4().to_string();
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Build from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }
        if let Some(session) = get(ENV_SESSION) {
            config = config.with_session_id(session);
        }
        if let Some(path) = get(ENV_LOG_FILE) {
            config = config.with_log_file(path);
        }
        if let Some(filter) = get(ENV_LOG_FILTER) {
            config = config.with_log_filter(filter);
        }
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.session_id.trim().is_empty() {
            return Err(ConfigError::EmptySessionId);
        }
        Ok(())
    }
}

/// `<cache dir>/roundtable/roundtable.log`, when the platform has a cache dir.
pub fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("roundtable").join("roundtable.log"))
}
