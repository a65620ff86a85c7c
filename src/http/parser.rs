//! HTTP response parsing
//!
//! One-shot parsing of a complete response. The client reads until the peer
//! closes (it always sends `Connection: close`), decodes the bytes to text,
//! and hands the whole thing here: the text splits on the first blank line
//! into a header block and the body.

use super::{Error, Headers, HttpResponse, Result, Status, CRLF};

/// Parse a status line into its status code.
///
/// The line must carry three whitespace-delimited tokens
/// (`VERSION STATUS REASON`); the second must be an integer.
pub fn parse_status_line(line: &str) -> Result<Status> {
    let mut parts = line.splitn(3, char::is_whitespace);
    let (_version, code, _reason) = match (parts.next(), parts.next(), parts.next()) {
        (Some(v), Some(c), Some(r)) => (v, c, r),
        _ => {
            return Err(Error::Protocol(format!(
                "status line does not split into three tokens: {line:?}"
            )))
        }
    };

    let code = code
        .parse::<u16>()
        .map_err(|_| Error::Protocol(format!("invalid status code: {code:?}")))?;

    Ok(Status::new(code))
}

/// Parse a complete, already-decoded HTTP response.
///
/// Splits on the first `\r\n\r\n`; header lines split on the first `": "`,
/// and lines without that separator are skipped. Duplicate header names keep
/// the last value.
pub fn parse_response(text: &str) -> Result<HttpResponse> {
    let (head, body) = match text.split_once("\r\n\r\n") {
        Some((head, body)) => (head, body),
        None => (text, ""),
    };

    let mut lines = head.split(CRLF);
    let status_line = lines.next().unwrap_or("");
    let status = parse_status_line(status_line)?;

    let mut headers = Headers::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(": ") {
            headers.insert(name, value);
        }
    }

    Ok(HttpResponse::new(status, headers, body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_line() {
        assert_eq!(parse_status_line("HTTP/1.1 200 OK").unwrap().code(), 200);
        assert_eq!(parse_status_line("HTTP/1.1 301 Moved Permanently").unwrap().code(), 301);
    }

    #[test]
    fn test_parse_status_line_errors() {
        assert!(matches!(parse_status_line("HTTP/1.1 200").unwrap_err(), Error::Protocol(_)));
        assert!(matches!(parse_status_line("").unwrap_err(), Error::Protocol(_)));
        assert!(matches!(
            parse_status_line("HTTP/1.1 abc OK").unwrap_err(),
            Error::Protocol(_)
        ));
    }

    #[test]
    fn test_parse_response() {
        let text = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 5\r\n\r\nHello";
        let response = parse_response(text).unwrap();

        assert_eq!(response.status().code(), 200);
        assert_eq!(response.headers().get("Content-Type"), Some("text/html"));
        assert_eq!(response.body(), "Hello");
    }

    #[test]
    fn test_parse_response_no_body() {
        let text = "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
        let response = parse_response(text).unwrap();

        assert_eq!(response.status().code(), 404);
        assert_eq!(response.body(), "");
    }

    #[test]
    fn test_parse_response_missing_blank_line() {
        let text = "HTTP/1.1 200 OK\r\nContent-Length: 0";
        let response = parse_response(text).unwrap();
        assert_eq!(response.status().code(), 200);
        assert_eq!(response.body(), "");
    }

    #[test]
    fn test_parse_response_duplicate_header_last_wins() {
        let text = "HTTP/1.1 200 OK\r\nX-A: 1\r\nX-A: 2\r\n\r\n";
        let response = parse_response(text).unwrap();
        assert_eq!(response.headers().get("X-A"), Some("2"));
    }

    #[test]
    fn test_parse_response_skips_malformed_header_lines() {
        let text = "HTTP/1.1 200 OK\r\nNoSeparatorHere\r\nX-B: ok\r\n\r\nbody";
        let response = parse_response(text).unwrap();
        assert_eq!(response.headers().get("X-B"), Some("ok"));
        assert_eq!(response.body(), "body");
    }

    #[test]
    fn test_parse_response_body_keeps_blank_lines() {
        let text = "HTTP/1.1 200 OK\r\n\r\nline1\r\n\r\nline2";
        let response = parse_response(text).unwrap();
        assert_eq!(response.body(), "line1\r\n\r\nline2");
    }
}
