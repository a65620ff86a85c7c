//! HTTP message types
//!
//! Wire-level types shared by the client and the file server: the supported
//! methods, status codes with their canonical reason phrases, the outgoing
//! request (with builder and serializer) and the client-observed response.

use super::{Error, Headers, Result, CRLF, HTTP_VERSION};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

/// HTTP methods the client speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Parse method from string
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }

    /// Convert method to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    code: u16,
}

impl Status {
    /// Wrap a status code. No range validation: the client reports whatever
    /// integer the peer sent.
    pub fn new(code: u16) -> Self {
        Status { code }
    }

    /// Get the status code
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Get the canonical reason phrase for this status code
    pub fn reason_phrase(&self) -> &'static str {
        match self.code {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            _ => "Unknown",
        }
    }

    /// Check if this is a success status (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Check if this is a redirection status (3xx)
    pub fn is_redirection(&self) -> bool {
        (300..400).contains(&self.code)
    }

    // Status codes the server emits
    pub const OK: Status = Status { code: 200 };
    pub const MOVED_PERMANENTLY: Status = Status { code: 301 };
    pub const FORBIDDEN: Status = Status { code: 403 };
    pub const NOT_FOUND: Status = Status { code: 404 };
    pub const METHOD_NOT_ALLOWED: Status = Status { code: 405 };
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason_phrase())
    }
}

/// An outgoing HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    target: String,
    headers: Headers,
    body: Vec<u8>,
}

impl HttpRequest {
    /// Create a builder for constructing requests
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    /// Get the request method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Get the request target (path plus query)
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get the body
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Serialize to wire format: request line, headers in insertion order,
    /// blank line, body.
    pub fn to_wire(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(256 + self.body.len());

        buf.put_slice(self.method.as_str().as_bytes());
        buf.put_u8(b' ');
        buf.put_slice(self.target.as_bytes());
        buf.put_u8(b' ');
        buf.put_slice(HTTP_VERSION.as_bytes());
        buf.put_slice(CRLF.as_bytes());

        for (name, value) in self.headers.iter() {
            buf.put_slice(name.as_bytes());
            buf.put_slice(b": ");
            buf.put_slice(value.as_bytes());
            buf.put_slice(CRLF.as_bytes());
        }

        buf.put_slice(CRLF.as_bytes());
        buf.put_slice(&self.body);

        buf.freeze()
    }
}

/// Builder for HTTP requests
#[derive(Debug, Default)]
pub struct HttpRequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    headers: Headers,
    body: Vec<u8>,
}

impl HttpRequestBuilder {
    /// Set the HTTP method
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the request target
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the body
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Build the request
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            method: self.method.unwrap_or(Method::Get),
            target: self.target.unwrap_or_else(|| "/".to_string()),
            headers: self.headers,
            body: self.body,
        }
    }
}

/// A parsed HTTP response, as the client observes it
///
/// The body is text: the client decodes the whole response (UTF-8 with an
/// ISO-8859-1 fallback) before splitting it, so what remains after the
/// header block is already a string.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: Status,
    headers: Headers,
    body: String,
}

impl HttpResponse {
    /// Assemble a response from its parsed parts
    pub fn new(status: Status, headers: Headers, body: String) -> Self {
        HttpResponse { status, headers, body }
    }

    /// Get the status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Get the headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get the body text
    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str() {
        assert_eq!(Method::from_str("GET").unwrap(), Method::Get);
        assert_eq!(Method::from_str("POST").unwrap(), Method::Post);
        assert!(matches!(Method::from_str("PUT").unwrap_err(), Error::InvalidMethod(_)));
        assert!(matches!(Method::from_str("get").unwrap_err(), Error::InvalidMethod(_)));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::OK.to_string(), "200 OK");
        assert_eq!(Status::MOVED_PERMANENTLY.to_string(), "301 Moved Permanently");
        assert_eq!(Status::new(999).reason_phrase(), "Unknown");
    }

    #[test]
    fn test_status_classes() {
        assert!(Status::OK.is_success());
        assert!(Status::MOVED_PERMANENTLY.is_redirection());
        assert!(!Status::NOT_FOUND.is_success());
    }

    #[test]
    fn test_request_to_wire() {
        let req = HttpRequest::builder()
            .method(Method::Get)
            .target("/echo?A=b")
            .header("Host", "example.com")
            .header("Connection", "close")
            .build();

        let wire = req.to_wire();
        assert_eq!(
            &wire[..],
            b"GET /echo?A=b HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n".as_slice()
        );
    }

    #[test]
    fn test_request_to_wire_with_body() {
        let req = HttpRequest::builder()
            .method(Method::Post)
            .target("/")
            .header("Content-Length", "3")
            .body(b"A=b".to_vec())
            .build();

        let wire = req.to_wire();
        assert!(wire.starts_with(b"POST / HTTP/1.1\r\n"));
        assert!(wire.ends_with(b"\r\n\r\nA=b"));
    }
}
