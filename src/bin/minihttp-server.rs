//! File server entry point: serves `www/` on 0.0.0.0:8000 and appends
//! access records to `logs/access.jsonl`.

use minihttp::server::{FileServer, ServerConfig};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> std::process::ExitCode {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = ServerConfig::default();
    info!(host = %config.host, port = config.port, doc_root = %config.doc_root.display(), "starting");

    let server = match FileServer::bind(config) {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "bind failed");
            return std::process::ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run() {
        error!(cause = %e, "server error");
        return std::process::ExitCode::FAILURE;
    }

    std::process::ExitCode::SUCCESS
}
