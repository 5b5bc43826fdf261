use crate::digest::md5_hex;

const MAX_EXTENSION_LEN: usize = 4;

/// Produces the name of the file a resource is cached under.
pub trait FileNameGenerator: Send + Sync {
    /// `id` identifies the resource; `url` is where it is fetched from.
    fn generate(&self, id: &str, url: &str) -> String;
}

/// Names cache files by the MD5 of the resource id plus the URL's extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5FileNameGenerator;

impl FileNameGenerator for Md5FileNameGenerator {
    fn generate(&self, id: &str, url: &str) -> String {
        let name = md5_hex(id);
        let ext = extension(url);
        if ext.is_empty() {
            name
        } else {
            format!("{name}.{ext}")
        }
    }
}

/// Extension of the last path segment of `url`.
///
/// With a query string the extension runs up to the last `?`; without one it is
/// accepted only when at most `MAX_EXTENSION_LEN` characters follow the dot.
fn extension(url: &str) -> &str {
    let Some(dot) = url.rfind('.') else {
        return "";
    };
    if url.rfind('/').is_some_and(|slash| slash > dot) {
        return "";
    }
    if let Some(qmark) = url.rfind('?')
        && qmark > dot
    {
        return &url[dot + 1..qmark];
    }
    let ext = &url[dot + 1..];
    if ext.chars().count() <= MAX_EXTENSION_LEN {
        ext
    } else {
        ""
    }
}
