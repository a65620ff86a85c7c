//! End-to-end tests: the client and the file server talking to each other
//! over real TCP on an ephemeral port.

use minihttp::http::{HttpClient, Method};
use minihttp::server::{FileServer, ServerConfig};
use std::net::SocketAddr;
use std::thread;
use tempfile::TempDir;

const INDEX_HTML: &str =
    "<!DOCTYPE html>\n<html><body><ul><li>Here's a random number: 6601674</li></ul></body></html>\n";

fn start_server() -> (SocketAddr, TempDir) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::create_dir(dir.path().join("deep")).unwrap();
    std::fs::write(dir.path().join("deep/index.html"), "<html>deep</html>").unwrap();

    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        doc_root: dir.path().to_path_buf(),
        access_log: dir.path().join("logs/access.jsonl"),
    };

    let server = FileServer::bind(config).unwrap();
    let addr = server.local_addr().unwrap();
    thread::spawn(move || server.run());

    (addr, dir)
}

#[test]
fn test_get_root_returns_fixture() {
    let (addr, _dir) = start_server();

    let client = HttpClient::new();
    let response = client
        .command(Method::Get, &format!("http://127.0.0.1:{}/", addr.port()), &[])
        .unwrap();

    assert_eq!(response.status().code(), 200);
    assert_eq!(response.body(), INDEX_HTML);
    assert_eq!(response.headers().get("Content-Type"), Some("text/html"));
    assert_eq!(
        response.headers().get("Content-Length"),
        Some(INDEX_HTML.len().to_string().as_str())
    );
}

#[test]
fn test_get_missing_returns_404() {
    let (addr, _dir) = start_server();

    let client = HttpClient::new();
    let response = client
        .command(
            Method::Get,
            &format!("http://127.0.0.1:{}/buffalo.html/", addr.port()),
            &[],
        )
        .unwrap();

    assert_eq!(response.status().code(), 404);
    assert_eq!(response.body(), "");
}

#[test]
fn test_redirect_then_manual_follow() {
    let (addr, _dir) = start_server();
    let client = HttpClient::new();
    let base = format!("http://127.0.0.1:{}", addr.port());

    // the client follows no redirects itself; re-issue against Location
    let redirect = client.command(Method::Get, &format!("{base}/deep"), &[]).unwrap();
    assert_eq!(redirect.status().code(), 301);
    assert!(redirect.status().is_redirection());

    let location = redirect.headers().get("Location").expect("Location header");
    assert_eq!(location, "/deep/");

    let followed = client
        .command(Method::Get, &format!("{base}{location}"), &[])
        .unwrap();
    assert_eq!(followed.status().code(), 200);
    assert_eq!(followed.body(), "<html>deep</html>");
}

#[test]
fn test_post_to_get_only_server_is_405() {
    let (addr, _dir) = start_server();

    let client = HttpClient::new();
    let response = client
        .command(
            Method::Post,
            &format!("http://127.0.0.1:{}/", addr.port()),
            &[("A".to_string(), "b".to_string())],
        )
        .unwrap();

    assert_eq!(response.status().code(), 405);
}

#[test]
fn test_client_percent_encodes_path_server_decodes() {
    let (addr, dir) = start_server();
    std::fs::write(dir.path().join("with space.html"), "<html>spaced</html>").unwrap();

    let client = HttpClient::new();
    let response = client
        .command(
            Method::Get,
            &format!("http://127.0.0.1:{}/with space.html", addr.port()),
            &[],
        )
        .unwrap();

    assert_eq!(response.status().code(), 200);
    assert_eq!(response.body(), "<html>spaced</html>");
}
