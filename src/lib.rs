//! Building blocks of the mediacache proxy: the shared HTTP client used to fetch
//! remote media, and the naming scheme for cached files.

pub use mediacache_file as file;
pub use mediacache_http as http;

pub use mediacache_file::{FileNameGenerator, Md5FileNameGenerator};
pub use mediacache_http::{
    ClientBuilder, HttpClient, HttpError, HttpSource, new_builder, shared_client,
};
