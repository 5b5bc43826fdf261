use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
    #[error("failed to read config file: {0}")]
    ConfigRead(#[source] std::io::Error),
    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("error opening connection for {url} with offset {offset}: {source}")]
    Open {
        url: String,
        offset: u64,
        #[source]
        source: reqwest::Error,
    },
    #[error("error reading data from {url}: {source}")]
    Read {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("error reading data from {url}: connection is absent")]
    NotOpen { url: String },
    #[error("HTTP {code} from {url}")]
    Status { code: u16, url: String },
    #[error("too many redirects: {0}")]
    TooManyRedirects(usize),
    #[error("redirect from {url} has no usable Location header")]
    BadRedirect { url: String },
}

impl HttpError {
    /// HTTP status code carried by a `Status` error.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
