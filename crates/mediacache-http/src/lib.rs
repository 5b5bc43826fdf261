//! Shared HTTP client with fixed timeouts, builders derived from it, and the
//! ranged media source built on top of them.

mod client;
pub mod config;
mod error;
mod shared;
pub mod source;

pub use client::{
    ClientBuilder, ClientSettings, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_REDIRECTS,
    DEFAULT_READ_TIMEOUT, HttpClient,
};
pub use config::HttpConfig;
pub use error::HttpError;
pub use shared::{new_builder, shared_client, shared_client_constructions, try_shared_client};
pub use source::{HttpSource, SourceInfo};
