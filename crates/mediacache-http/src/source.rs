//! Remote media source read through clients derived from the shared one.
//!
//! Redirects are followed by hand so that every hop keeps the `Range` header and the
//! hop count stays bounded by [`MAX_REDIRECTS`].

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION, RANGE};

use crate::client::HttpClient;
use crate::error::HttpError;
use crate::shared::try_shared_client;

pub const MAX_REDIRECTS: usize = 5;
/// Connect and read timeout used when only fetching length and mime type.
pub const INFO_TIMEOUT: Duration = Duration::from_secs(10);

/// What is known about a remote resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub url: String,
    pub length: Option<u64>,
    pub mime: Option<String>,
}

/// HTTP resource opened at an arbitrary byte offset and read in chunks.
#[derive(Debug)]
pub struct HttpSource {
    info: SourceInfo,
    client: HttpClient,
    info_client: HttpClient,
    response: Option<reqwest::Response>,
}

impl HttpSource {
    /// Create a source for `url` with clients derived from the shared client.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Build` if the shared client or a derived client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self, HttpError> {
        let client = try_shared_client()?
            .new_builder()
            .follow_redirects(false)
            .build()?;
        let info_client = client
            .new_builder()
            .connect_timeout(INFO_TIMEOUT)
            .read_timeout(INFO_TIMEOUT)
            .build()?;
        Ok(Self {
            info: SourceInfo {
                url: url.into(),
                length: None,
                mime: None,
            },
            client,
            info_client,
            response: None,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.info.url
    }

    #[must_use]
    pub fn info(&self) -> &SourceInfo {
        &self.info
    }

    /// Total length of the resource, asking the origin while it is unknown.
    pub async fn length(&mut self) -> Option<u64> {
        if self.info.length.is_none() {
            self.fetch_content_info().await;
        }
        self.info.length
    }

    /// Mime type of the resource, asking the origin while it is unknown.
    pub async fn mime(&mut self) -> Option<&str> {
        if self.info.mime.as_deref().is_none_or(str::is_empty) {
            self.fetch_content_info().await;
        }
        self.info.mime.as_deref()
    }

    /// Open the resource at `offset`.
    ///
    /// If the ranged request cannot be sent, the resource is reopened from the start
    /// and `true` is returned: the caller must overwrite what it cached so far.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Open` if no connection could be made,
    /// `HttpError::TooManyRedirects` or `HttpError::BadRedirect` for broken redirect
    /// chains, and `HttpError::Status` for 4xx/5xx responses.
    pub async fn open(&mut self, offset: u64) -> Result<bool, HttpError> {
        self.response = None;
        let (response, offset, need_cover) =
            match request(&self.client, &self.info.url, offset).await {
                Ok(response) => (response, offset, false),
                Err(e @ HttpError::Open { .. }) => {
                    tracing::warn!("{e}, reopening from the start");
                    (request(&self.client, &self.info.url, 0).await?, 0, true)
                }
                Err(e) => return Err(e),
            };

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(HttpError::Status {
                code: status.as_u16(),
                url: self.info.url.clone(),
            });
        }

        let content_length = content_length(&response);
        let length = match status {
            StatusCode::OK => content_length,
            StatusCode::PARTIAL_CONTENT => content_length.map(|len| len + offset),
            _ => self.info.length,
        };
        self.info.length = length;
        self.info.mime = mime(&response);
        self.response = Some(response);
        Ok(need_cover)
    }

    /// Append the next chunk of the opened resource to `buf`.
    ///
    /// Returns the number of bytes appended; `0` marks the end of the resource.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::NotOpen` before [`open`](Self::open) or after
    /// [`close`](Self::close), and `HttpError::Read` if the transfer fails.
    pub async fn read(&mut self, buf: &mut Vec<u8>) -> Result<usize, HttpError> {
        let Some(response) = self.response.as_mut() else {
            return Err(HttpError::NotOpen {
                url: self.info.url.clone(),
            });
        };
        match response.chunk().await {
            Ok(Some(chunk)) => {
                buf.extend_from_slice(&chunk);
                Ok(chunk.len())
            }
            Ok(None) => Ok(0),
            Err(source) => Err(HttpError::Read {
                url: self.info.url.clone(),
                source,
            }),
        }
    }

    /// Drop the open connection, if any.
    pub fn close(&mut self) {
        self.response = None;
    }

    async fn fetch_content_info(&mut self) {
        tracing::debug!(url = %self.info.url, "read content info");
        match request(&self.info_client, &self.info.url, 0).await {
            Ok(response)
                if !response.status().is_client_error() && !response.status().is_server_error() =>
            {
                self.info.length = content_length(&response);
                self.info.mime = mime(&response);
                tracing::debug!(
                    length = ?self.info.length,
                    mime = ?self.info.mime,
                    "source info fetched"
                );
            }
            Ok(response) => {
                tracing::error!(
                    url = %self.info.url,
                    status = response.status().as_u16(),
                    "error fetching source info"
                );
            }
            Err(e) => tracing::error!("error fetching source info: {e}"),
        }
    }
}

/// Send a GET to `url`, following up to `MAX_REDIRECTS` redirects by hand.
async fn request(
    client: &HttpClient,
    url: &str,
    offset: u64,
) -> Result<reqwest::Response, HttpError> {
    let mut url = url.to_owned();
    let mut redirects = 0;
    loop {
        tracing::debug!(offset, url = %url, "open connection");
        let mut req = client.get(&url);
        if offset > 0 {
            req = req.header(RANGE, format!("bytes={offset}-"));
        }
        let response = req.send().await.map_err(|source| HttpError::Open {
            url: url.clone(),
            offset,
            source,
        })?;
        if !is_redirect(response.status()) {
            return Ok(response);
        }

        let next = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|location| response.url().join(location).ok())
            .ok_or_else(|| HttpError::BadRedirect { url: url.clone() })?;
        redirects += 1;
        if redirects > MAX_REDIRECTS {
            return Err(HttpError::TooManyRedirects(redirects));
        }
        url = next.into();
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 300 | 301 | 302 | 303 | 307 | 308)
}

fn content_length(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

fn mime(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
