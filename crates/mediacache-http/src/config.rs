use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::{
    ClientBuilder, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_REDIRECTS, DEFAULT_READ_TIMEOUT,
};
use crate::error::HttpError;

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT.as_secs()
}

fn default_read_timeout_secs() -> u64 {
    DEFAULT_READ_TIMEOUT.as_secs()
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

/// File and environment configuration for clients built outside the shared instance.
///
/// The shared client never reads this; its timeouts stay fixed. A timeout of `0`
/// disables that timeout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            user_agent: None,
            max_redirects: default_max_redirects(),
        }
    }
}

impl HttpConfig {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, HttpError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(HttpError::ConfigRead)?;
            toml::from_str::<Self>(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("MEDIACACHE_HTTP_CONNECT_TIMEOUT") {
            match v.parse::<u64>() {
                Ok(secs) => self.connect_timeout_secs = secs,
                Err(_) => tracing::warn!("ignoring invalid MEDIACACHE_HTTP_CONNECT_TIMEOUT value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("MEDIACACHE_HTTP_READ_TIMEOUT") {
            match v.parse::<u64>() {
                Ok(secs) => self.read_timeout_secs = secs,
                Err(_) => tracing::warn!("ignoring invalid MEDIACACHE_HTTP_READ_TIMEOUT value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("MEDIACACHE_HTTP_USER_AGENT") {
            self.user_agent = Some(v);
        }
        if let Ok(v) = std::env::var("MEDIACACHE_HTTP_MAX_REDIRECTS") {
            match v.parse::<usize>() {
                Ok(n) => self.max_redirects = n,
                Err(_) => tracing::warn!("ignoring invalid MEDIACACHE_HTTP_MAX_REDIRECTS value: {v}"),
            }
        }
    }

    /// Builder carrying this configuration's values.
    #[must_use]
    pub fn builder(&self) -> ClientBuilder {
        let builder = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .read_timeout(Duration::from_secs(self.read_timeout_secs))
            .max_redirects(self.max_redirects);
        match self.user_agent {
            Some(ref user_agent) => builder.user_agent(user_agent.clone()),
            None => builder,
        }
    }
}
