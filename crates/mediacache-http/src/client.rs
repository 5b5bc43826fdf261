//! Configured HTTP client handle and the builder used to derive new ones.

use std::time::Duration;

use crate::error::HttpError;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);
/// Hop limit of `reqwest::redirect::Policy::default()`.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Settings a [`HttpClient`] was built from.
///
/// A zero timeout means the client never times out on that phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// `None` sends no `User-Agent` header, as a bare `reqwest` client does.
    pub user_agent: Option<String>,
    pub follow_redirects: bool,
    pub max_redirects: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            user_agent: None,
            follow_redirects: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// A `reqwest::Client` together with the settings it was built from.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    settings: ClientSettings,
}

impl HttpClient {
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.settings.connect_timeout
    }

    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        self.settings.read_timeout
    }

    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.settings.user_agent.as_deref()
    }

    #[must_use]
    pub fn follow_redirects(&self) -> bool {
        self.settings.follow_redirects
    }

    #[must_use]
    pub fn max_redirects(&self) -> usize {
        self.settings.max_redirects
    }

    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// The underlying `reqwest` client, for requests this wrapper does not cover.
    #[must_use]
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Start a GET request to `url`.
    pub fn get<U: reqwest::IntoUrl>(&self, url: U) -> reqwest::RequestBuilder {
        self.inner.get(url)
    }

    /// Create an independent builder pre-populated with this client's settings.
    ///
    /// Changes made to the builder never reach `self`.
    #[must_use]
    pub fn new_builder(&self) -> ClientBuilder {
        ClientBuilder {
            settings: self.settings.clone(),
        }
    }
}

/// Value builder for [`HttpClient`]. Setters consume and return the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientBuilder {
    settings: ClientSettings,
}

impl ClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero disables the connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.settings.connect_timeout = timeout;
        self
    }

    /// Zero disables the read timeout.
    #[must_use]
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.settings.read_timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.settings.user_agent = Some(user_agent.into());
        self
    }

    /// When disabled, 3xx responses are returned to the caller as-is.
    #[must_use]
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.settings.follow_redirects = follow;
        self
    }

    #[must_use]
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.settings.max_redirects = max;
        self
    }

    /// Settings the builder currently holds.
    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Build a new client from the current settings.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Build` if `reqwest` rejects the configuration (for example a
    /// user agent that is not a valid header value).
    pub fn build(self) -> Result<HttpClient, HttpError> {
        let settings = self.settings;

        let mut builder = reqwest::Client::builder();
        if !settings.connect_timeout.is_zero() {
            builder = builder.connect_timeout(settings.connect_timeout);
        }
        if !settings.read_timeout.is_zero() {
            builder = builder.read_timeout(settings.read_timeout);
        }
        if let Some(ref user_agent) = settings.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let policy = if settings.follow_redirects {
            reqwest::redirect::Policy::limited(settings.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };
        let inner = builder.redirect(policy).build()?;

        tracing::debug!(
            connect_timeout_secs = settings.connect_timeout.as_secs(),
            read_timeout_secs = settings.read_timeout.as_secs(),
            follow_redirects = settings.follow_redirects,
            "built HTTP client"
        );
        Ok(HttpClient { inner, settings })
    }
}
