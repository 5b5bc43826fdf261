//! Process-wide shared HTTP client.
//!
//! The client is built on first access with fixed 60s connect and read timeouts and
//! lives for the rest of the process. Callers that need different settings derive a
//! builder with [`new_builder`] and build their own client from it.

use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::OnceCell;

use crate::client::{ClientBuilder, HttpClient};
use crate::error::HttpError;

static SHARED: OnceCell<HttpClient> = OnceCell::new();

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

fn construct() -> Result<HttpClient, HttpError> {
    CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);

    let client = ClientBuilder::new().build()?;
    tracing::debug!(
        connect_timeout_secs = client.connect_timeout().as_secs(),
        read_timeout_secs = client.read_timeout().as_secs(),
        "initialized shared HTTP client"
    );
    Ok(client)
}

/// Return the shared client, constructing it on first use.
///
/// Concurrent first callers block until a single construction finishes and all
/// observe the same instance. A failed construction stores nothing.
///
/// # Errors
///
/// Returns the construction error from the underlying client library.
pub fn try_shared_client() -> Result<&'static HttpClient, HttpError> {
    SHARED.get_or_try_init(construct)
}

/// Return the shared client, constructing it on first use.
///
/// # Panics
///
/// Panics if the client cannot be constructed (TLS backend initialization failure).
#[must_use]
pub fn shared_client() -> &'static HttpClient {
    match try_shared_client() {
        Ok(client) => client,
        Err(e) => panic!("shared HTTP client construction must not fail: {e}"),
    }
}

/// Fresh builder seeded with the shared client's settings.
///
/// # Panics
///
/// Panics under the same conditions as [`shared_client`].
#[must_use]
pub fn new_builder() -> ClientBuilder {
    shared_client().new_builder()
}

/// Number of times construction of the shared client has been attempted.
#[doc(hidden)]
#[must_use]
pub fn shared_client_constructions() -> usize {
    CONSTRUCTIONS.load(Ordering::SeqCst)
}
