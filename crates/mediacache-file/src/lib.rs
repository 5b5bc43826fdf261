//! Cache file naming: maps a resource id and its URL to the file it is cached under.

mod digest;
mod name;

pub use digest::md5_hex;
pub use name::{FileNameGenerator, Md5FileNameGenerator};
