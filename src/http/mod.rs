//! HTTP/1.1 protocol engines
//!
//! Everything needed to speak one HTTP/1.1 exchange over a raw socket:
//! URL parsing, percent encoding, the header map, wire message types,
//! response parsing and the blocking client. The connection model is
//! deliberately minimal: one request per connection, `Connection: close`
//! on both sides, bodies framed by `Content-Length` or by EOF.
//!
//! # Examples
//!
//! ```no_run
//! use minihttp::http::{HttpClient, Method};
//!
//! let client = HttpClient::new();
//! let response = client.command(Method::Get, "http://127.0.0.1:8000/", &[]).unwrap();
//! assert_eq!(response.status().code(), 200);
//! ```

pub mod client;
pub mod headers;
pub mod message;
pub mod parser;
pub mod percent;
pub mod url;

pub use client::HttpClient;
pub use headers::Headers;
pub use message::{HttpRequest, HttpResponse, Method, Status};
pub use parser::parse_response;
pub use url::Url;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP operation errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    #[error("Percent-decode error: {0}")]
    Decode(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),
}

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// The only HTTP version spoken here
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// CRLF line ending
pub const CRLF: &str = "\r\n";
