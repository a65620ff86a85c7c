//! Absolute URL parsing
//!
//! Splits a `scheme://host[:port][/path][?query]` URL into its parts and
//! percent-encodes the path and query on the way in, so a `Url` always
//! carries a wire-ready request target.

use super::{percent, Error, Result, DEFAULT_HTTP_PORT};

/// A parsed absolute URL.
///
/// `path` is percent-encoded and stored without its leading slash (it may be
/// empty); `query` is percent-encoded content behind a literal leading `?`,
/// or empty when the URL has no query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    host: String,
    port: u16,
    path: String,
    query: String,
}

impl Url {
    /// Parse an absolute URL.
    ///
    /// Fails with `Error::MalformedUrl` when no `//` is present, the host
    /// segment is empty, or the port does not parse.
    pub fn parse(url: &str) -> Result<Self> {
        let (_, rest) = url
            .split_once("//")
            .ok_or_else(|| Error::MalformedUrl(format!("no '//' in URL: {url}")))?;

        let (authority, path_and_query) = match rest.split_once('/') {
            Some((authority, remainder)) => (authority, remainder),
            None => (rest, ""),
        };

        let (host, port) = parse_authority(authority)?;
        if host.is_empty() {
            return Err(Error::MalformedUrl(format!("empty host in URL: {url}")));
        }

        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, query),
            None => (path_and_query, ""),
        };

        let (path, _) = percent::encode_path(path);
        let query = if query.is_empty() {
            String::new()
        } else {
            format!("?{}", percent::encode(query).0)
        };

        Ok(Url { host, port, path, query })
    }

    /// Host, without brackets for IPv6 literals.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port, defaulting to 80 when the URL named none.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Percent-encoded path without its leading slash; may be empty.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Percent-encoded query including the leading `?`, or empty.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the host is an IPv6 literal.
    pub fn is_ipv6(&self) -> bool {
        self.host.contains(':')
    }

    /// The request target for the request line: `/` + path + query.
    pub fn request_target(&self) -> String {
        format!("/{}{}", self.path, self.query)
    }

    /// The `Host` header value.
    ///
    /// The port is omitted when it is the default (80); IPv6 literals are
    /// bracketed.
    pub fn host_header(&self) -> String {
        match (self.is_ipv6(), self.port == DEFAULT_HTTP_PORT) {
            (true, true) => format!("[{}]", self.host),
            (true, false) => format!("[{}]:{}", self.host, self.port),
            (false, true) => self.host.clone(),
            (false, false) => format!("{}:{}", self.host, self.port),
        }
    }
}

/// Split the authority into host and port.
///
/// A `]` marks a bracketed IPv6 literal: the host is the text between the
/// brackets, and only a `:` directly after `]` introduces a port. Anything
/// else splits on the last `:`, with no colon meaning the default port.
fn parse_authority(authority: &str) -> Result<(String, u16)> {
    if let Some((bracketed, after)) = authority.split_once(']') {
        let host = bracketed.strip_prefix('[').unwrap_or(bracketed).to_string();
        let port = match after.strip_prefix(':') {
            Some(port) => parse_port(port)?,
            None => DEFAULT_HTTP_PORT,
        };
        return Ok((host, port));
    }

    match authority.rsplit_once(':') {
        Some((host, port)) => Ok((host.to_string(), parse_port(port)?)),
        None => Ok((authority.to_string(), DEFAULT_HTTP_PORT)),
    }
}

fn parse_port(port: &str) -> Result<u16> {
    port.parse::<u16>()
        .map_err(|_| Error::MalformedUrl(format!("invalid port: {port:?}")))
}
