//! Command-line HTTP client: `minihttp-client METHOD URL [KEY VALUE]...`
//!
//! Key/value pairs become query arguments for GET and a form body for POST.
//! A trailing key without a value gets an empty string.

use minihttp::http::{HttpClient, Method};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn usage() {
    eprintln!("usage: minihttp-client [GET/POST] [URL] [key1] [value1] [key2] [value2] ...");
}

fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::WARN).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let (method, url) = match (argv.first(), argv.get(1)) {
        (Some(method), Some(url)) => (method.as_str(), url.as_str()),
        _ => {
            usage();
            return ExitCode::FAILURE;
        }
    };

    let method = match Method::from_str(method) {
        Ok(method) => method,
        Err(e) => {
            eprintln!("{e}");
            usage();
            return ExitCode::FAILURE;
        }
    };

    let mut args = Vec::new();
    let mut pending_key: Option<&String> = None;
    for arg in &argv[2..] {
        match pending_key.take() {
            None => pending_key = Some(arg),
            Some(key) => args.push((key.clone(), arg.clone())),
        }
    }
    if let Some(key) = pending_key {
        args.push((key.clone(), String::new()));
    }

    match HttpClient::new().command(method, url, &args) {
        Ok(response) => {
            println!("Response code: {}", response.status().code());
            println!("Response body:");
            println!("{}", response.body());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
