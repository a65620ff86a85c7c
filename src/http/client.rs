//! HTTP client implementation
//!
//! A synchronous, blocking client: one fresh TCP connection per call, the
//! full request written up front, the response read until the peer closes
//! (both sides run `Connection: close`). There are no retries and no
//! redirect following; callers re-issue against a `Location` header
//! themselves.

use super::{
    parser, percent, Error, HttpRequest, HttpResponse, Method, Result, Url,
};
use bytes::BytesMut;
use std::io::{Read, Write};
use std::net::TcpStream;

/// Form or query arguments: ordered key/value pairs.
pub type Args = [(String, String)];

/// HTTP client
///
/// Stateless: every call parses its URL, opens its own socket and closes it
/// on the way out (on success and on every error path, via drop).
#[derive(Debug, Default)]
pub struct HttpClient;

impl HttpClient {
    /// Create a new client
    pub fn new() -> Self {
        HttpClient
    }

    /// Issue a request: `GET` or `POST` against an absolute URL.
    pub fn command(&self, method: Method, url: &str, args: &Args) -> Result<HttpResponse> {
        match method {
            Method::Get => self.get(url, args),
            Method::Post => self.post(url, args),
        }
    }

    /// Issue a GET request.
    ///
    /// `args` are percent-encoded as `k=v` pairs and appended to the URL's
    /// query: after `&` when the URL already has one, after `?` otherwise.
    pub fn get(&self, url: &str, args: &Args) -> Result<HttpResponse> {
        let url = Url::parse(url)?;

        let mut target = url.request_target();
        if !args.is_empty() {
            let (pairs, _) = encode_pairs(args);
            if url.query().is_empty() {
                target.push('?');
            } else {
                target.push('&');
            }
            target.push_str(&pairs);
        }

        let request = HttpRequest::builder()
            .method(Method::Get)
            .target(target)
            .header("Host", url.host_header())
            .header("Connection", "close")
            .build();

        self.exchange(&url, &request)
    }

    /// Issue a POST request.
    ///
    /// `args` become an `application/x-www-form-urlencoded` body with
    /// `Content-Type` and `Content-Length` headers; with no args, no body
    /// and no content headers are sent. The URL's own query is untouched.
    pub fn post(&self, url: &str, args: &Args) -> Result<HttpResponse> {
        let url = Url::parse(url)?;

        let mut builder = HttpRequest::builder()
            .method(Method::Post)
            .target(url.request_target())
            .header("Host", url.host_header())
            .header("Connection", "close");

        if !args.is_empty() {
            let (body, length) = encode_pairs(args);
            builder = builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .header("Content-Length", length.to_string())
                .body(body.into_bytes());
        }

        self.exchange(&url, &builder.build())
    }

    /// Connect, send one request, read the full response, parse it.
    fn exchange(&self, url: &Url, request: &HttpRequest) -> Result<HttpResponse> {
        let mut stream = TcpStream::connect((url.host(), url.port()))
            .map_err(|e| Error::Connection(format!("{}:{}: {e}", url.host(), url.port())))?;

        stream.write_all(&request.to_wire())?;

        let mut raw = BytesMut::with_capacity(8192);
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);
        }

        let text = decode_response_text(&raw);
        parser::parse_response(&text)
    }
}

/// Percent-encode `(k, v)` pairs with the strict charset and join them as
/// `k=v` with `&`. Returns the joined string and its byte length, computed
/// from the codec's escaped-unit counts.
fn encode_pairs(args: &Args) -> (String, usize) {
    let mut out = String::new();
    let mut length = 0;

    for (i, (key, value)) in args.iter().enumerate() {
        if i > 0 {
            out.push('&');
            length += 1;
        }
        let (key, key_len) = percent::encode(key);
        let (value, value_len) = percent::encode(value);
        out.push_str(&key);
        out.push('=');
        out.push_str(&value);
        length += key_len + 1 + value_len;
    }

    (out, length)
}

/// Decode response bytes as UTF-8, falling back to ISO-8859-1 (every byte
/// maps to the code point of the same value) when they are not valid UTF-8.
fn decode_response_text(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(text) => text.to_string(),
        Err(_) => raw.iter().map(|&b| b as char).collect(),
    }
}
