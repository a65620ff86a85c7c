//! Connection capability
//!
//! Line-oriented reads and response writes over any stream. The handler
//! talks to this instead of a socket, so tests can drive it with in-memory
//! buffers and production hands it a `TcpStream`.

use crate::http::{Error, Headers, Result, Status, CRLF, HTTP_VERSION};
use std::io::{BufRead, BufReader, Read, Write};

/// A single HTTP connection over some bidirectional stream.
pub struct Connection<S: Read + Write> {
    stream: BufReader<S>,
}

impl<S: Read + Write> Connection<S> {
    /// Wrap a stream
    pub fn new(stream: S) -> Self {
        Connection {
            stream: BufReader::new(stream),
        }
    }

    /// Read one line, stripping the trailing `\r\n` (or bare `\n`).
    ///
    /// Returns an empty string at a blank line and at EOF. The line must be
    /// UTF-8.
    pub fn read_line(&mut self) -> Result<String> {
        let mut raw = Vec::new();
        self.stream.read_until(b'\n', &mut raw)?;

        while raw.last() == Some(&b'\n') || raw.last() == Some(&b'\r') {
            raw.pop();
        }

        String::from_utf8(raw).map_err(|_| Error::Parse("request line is not UTF-8".to_string()))
    }

    /// Read header lines until the empty line that ends the block.
    ///
    /// Each line splits on its first `:`, both sides trimmed; duplicate
    /// names keep the last value. A line with no colon is a parse error.
    pub fn read_headers(&mut self) -> Result<Headers> {
        let mut headers = Headers::new();

        loop {
            let line = self.read_line()?;
            if line.is_empty() {
                return Ok(headers);
            }

            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| Error::Parse(format!("no colon in header line: {line:?}")))?;
            headers.insert(name.trim(), value.trim());
        }
    }

    /// Write the status line: `HTTP/1.1 CODE REASON`.
    pub fn write_status(&mut self, status: Status) -> Result<()> {
        let line = format!("{} {}{}", HTTP_VERSION, status, CRLF);
        self.stream.get_mut().write_all(line.as_bytes())?;
        Ok(())
    }

    /// Write one header line.
    pub fn write_header(&mut self, name: &str, value: &str) -> Result<()> {
        let line = format!("{name}: {value}{CRLF}");
        self.stream.get_mut().write_all(line.as_bytes())?;
        Ok(())
    }

    /// Write the blank line ending the header block.
    pub fn end_headers(&mut self) -> Result<()> {
        self.stream.get_mut().write_all(CRLF.as_bytes())?;
        Ok(())
    }

    /// Write the response body.
    pub fn write_body(&mut self, body: &[u8]) -> Result<()> {
        self.stream.get_mut().write_all(body)?;
        Ok(())
    }

    /// Flush pending writes.
    pub fn flush(&mut self) -> Result<()> {
        self.stream.get_mut().flush()?;
        Ok(())
    }

    /// Get a reference to the underlying stream
    pub fn get_ref(&self) -> &S {
        self.stream.get_ref()
    }

    /// Get a mutable reference to the underlying stream
    pub fn get_mut(&mut self) -> &mut S {
        self.stream.get_mut()
    }
}
