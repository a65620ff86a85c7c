//! Request-path resolution
//!
//! Maps a decoded request path onto the filesystem under the document root
//! and decides the response shape: a file to serve, a redirect, or an
//! error. The containment guard works on canonical paths, so symlinks and
//! `..` segments cannot reach outside the root.

use std::path::{Path, PathBuf};

/// A filesystem target ready to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Canonical absolute path of the file
    pub path: PathBuf,
    /// MIME type derived from the file extension
    pub mime: &'static str,
}

/// Outcome of resolving one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Serve this file
    File(ResolvedTarget),
    /// Directory requested without a trailing slash: redirect to this
    /// location (the raw request path plus `/`)
    Redirect(String),
    /// Resolved path escapes the document root
    Forbidden,
    /// No such file
    NotFound,
}

/// Resolve a request path against the document root.
///
/// `raw_path` is the request target exactly as received (still
/// percent-encoded); `decoded_path` is its percent-decoded form. `root`
/// must already be canonical.
pub fn resolve(root: &Path, raw_path: &str, decoded_path: &str) -> Resolution {
    let joined = root.join(decoded_path.trim_start_matches('/'));

    // Canonicalization also proves existence.
    let resolved = match joined.canonicalize() {
        Ok(path) => path,
        Err(_) => return Resolution::NotFound,
    };

    if !resolved.starts_with(root) {
        return Resolution::Forbidden;
    }

    if resolved.is_dir() {
        if !raw_path.ends_with('/') {
            return Resolution::Redirect(format!("{raw_path}/"));
        }

        let index = resolved.join("index.html");
        if !index.exists() {
            return Resolution::NotFound;
        }
        return Resolution::File(ResolvedTarget {
            mime: mime_type(&index),
            path: index,
        });
    }

    Resolution::File(ResolvedTarget {
        mime: mime_type(&resolved),
        path: resolved,
    })
}

/// MIME type from the file extension alone. Only HTML and CSS are known;
/// everything else is served as opaque bytes.
pub fn mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("html") => "text/html",
        Some("css") => "text/css",
        _ => "application/octet-stream",
    }
}
