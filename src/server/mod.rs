//! Static-file HTTP server
//!
//! A document-root file server speaking the minimal HTTP/1.1 dialect of the
//! `http` module: one request per connection, `GET` only, `Connection:
//! close` on every response. Each accepted connection gets its own thread;
//! the only state shared across connections is the append-only access log.

pub mod access_log;
pub mod connection;
pub mod handler;
pub mod resolve;

pub use access_log::{AccessLog, AccessLogEntry};
pub use connection::Connection;
pub use resolve::{Resolution, ResolvedTarget};

use crate::http::Result;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Server configuration
///
/// Everything the server needs, passed to the constructor instead of living
/// in process-wide globals.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Directory files are served from
    pub doc_root: PathBuf,
    /// JSONL access-log file
    pub access_log: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            doc_root: PathBuf::from("www"),
            access_log: PathBuf::from("logs/access.jsonl"),
        }
    }
}

/// State shared by every connection handler.
pub(crate) struct Shared {
    /// Canonicalized document root; the containment guard compares against
    /// this.
    pub doc_root: PathBuf,
    pub log: AccessLog,
}

/// The file server: a bound listener plus the shared handler state.
pub struct FileServer {
    listener: TcpListener,
    shared: Arc<Shared>,
}

impl FileServer {
    /// Bind the listener and canonicalize the document root.
    ///
    /// The document root must exist. The listening socket sets
    /// `SO_REUSEADDR` before binding so a restart does not trip over
    /// `TIME_WAIT` remnants.
    pub fn bind(config: ServerConfig) -> Result<Self> {
        let doc_root = config.doc_root.canonicalize()?;

        let addr: SocketAddr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("bad listen address: {e}"),
                )
            })?;

        let domain = Domain::for_address(addr);
        let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
        socket.set_reuse_address(true)?;
        socket.bind(&addr.into())?;
        socket.listen(128)?;

        let listener: TcpListener = socket.into();

        Ok(FileServer {
            listener,
            shared: Arc::new(Shared {
                doc_root,
                log: AccessLog::new(config.access_log),
            }),
        })
    }

    /// The address the server actually bound (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever, one thread per connection.
    pub fn run(&self) -> Result<()> {
        info!(addr = %self.listener.local_addr()?, "listening");

        loop {
            let (stream, peer) = match self.listener.accept() {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let shared = Arc::clone(&self.shared);
            thread::spawn(move || {
                if let Err(e) = handler::handle_connection(stream, peer, &shared) {
                    warn!(peer = %peer, cause = %e, "connection error");
                }
            });
        }
    }
}
