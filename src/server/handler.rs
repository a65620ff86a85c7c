//! Per-connection request handling
//!
//! One request per connection: read the request line and headers, resolve
//! the target, write exactly one response, log it, and let the connection
//! drop. A malformed request line or header block terminates the connection
//! with no response at all (diagnostic-logged only), matching the rest of
//! the error taxonomy where every failure is terminal.

use super::connection::Connection;
use super::resolve::{self, Resolution};
use super::{AccessLogEntry, Shared};
use crate::http::{percent, Error, Result, Status};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use tracing::debug;

/// Everything known about the request in flight, threaded through the
/// resolve and respond steps (and into the access log) instead of being
/// stashed on the handler.
struct RequestContext {
    ip: String,
    method: String,
    /// Request target exactly as received, still percent-encoded
    raw_path: String,
    /// Percent-decoded form, when decoding succeeded
    decoded_path: Option<String>,
}

impl RequestContext {
    /// The path the access log records: decoded when available, raw
    /// otherwise.
    fn log_path(&self) -> &str {
        self.decoded_path.as_deref().unwrap_or(&self.raw_path)
    }
}

/// Handle one accepted TCP connection.
pub(crate) fn handle_connection(stream: TcpStream, peer: SocketAddr, shared: &Shared) -> Result<()> {
    let mut conn = Connection::new(stream);
    handle(&mut conn, peer.ip().to_string(), shared)
}

/// The state machine proper, over any stream.
fn handle<S: Read + Write>(
    conn: &mut Connection<S>,
    ip: String,
    shared: &Shared,
) -> Result<()> {
    // AWAIT_REQUEST_LINE
    let request_line = conn.read_line()?;
    let mut parts = request_line.splitn(3, ' ');
    let (method, raw_path, _version) = match (parts.next(), parts.next(), parts.next()) {
        (Some(m), Some(p), Some(v)) => (m.to_string(), p.to_string(), v),
        _ => {
            return Err(Error::Parse(format!(
                "malformed request line: {request_line:?}"
            )))
        }
    };

    let mut ctx = RequestContext {
        ip,
        method,
        raw_path,
        decoded_path: None,
    };

    if ctx.method != "GET" {
        return respond_error(conn, &ctx, shared, Status::METHOD_NOT_ALLOWED, &[]);
    }

    match percent::decode(&ctx.raw_path) {
        Ok(decoded) => ctx.decoded_path = Some(decoded),
        Err(e) => {
            // Undecodable escapes fall back to a plain 404.
            debug!(path = %ctx.raw_path, cause = %e, "path decode failed");
            return respond_error(conn, &ctx, shared, Status::NOT_FOUND, &[]);
        }
    }

    // AWAIT_HEADERS (read and discarded: request bodies are not served here)
    let _headers = conn.read_headers()?;

    // RESOLVE
    let decoded = ctx.decoded_path.as_deref().unwrap_or("");
    let resolution = resolve::resolve(&shared.doc_root, &ctx.raw_path, decoded);

    // RESPOND
    match resolution {
        Resolution::File(target) => {
            let body = std::fs::read(&target.path)?;

            conn.write_status(Status::OK)?;
            conn.write_header("Content-Length", &body.len().to_string())?;
            conn.write_header("Content-Type", target.mime)?;
            conn.write_header("Connection", "close")?;
            conn.end_headers()?;
            conn.write_body(&body)?;
            conn.flush()?;

            log_outcome(&ctx, shared, Status::OK, body.len() as u64);
            Ok(())
        }
        Resolution::Redirect(location) => respond_error(
            conn,
            &ctx,
            shared,
            Status::MOVED_PERMANENTLY,
            &[("Location", location.as_str())],
        ),
        Resolution::Forbidden => respond_error(conn, &ctx, shared, Status::FORBIDDEN, &[]),
        Resolution::NotFound => respond_error(conn, &ctx, shared, Status::NOT_FOUND, &[]),
    }
}

/// Write a bodyless error (or redirect) response and log it.
fn respond_error<S: Read + Write>(
    conn: &mut Connection<S>,
    ctx: &RequestContext,
    shared: &Shared,
    status: Status,
    extra_headers: &[(&str, &str)],
) -> Result<()> {
    conn.write_status(status)?;
    for (name, value) in extra_headers {
        conn.write_header(name, value)?;
    }
    conn.write_header("Content-Length", "0")?;
    conn.write_header("Connection", "close")?;
    conn.end_headers()?;
    conn.flush()?;

    log_outcome(ctx, shared, status, 0);
    Ok(())
}

fn log_outcome(ctx: &RequestContext, shared: &Shared, status: Status, length: u64) {
    shared.log.write(&AccessLogEntry::now(
        ctx.ip.clone(),
        &ctx.method,
        ctx.log_path(),
        status.code(),
        length,
    ));
}
