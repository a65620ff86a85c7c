//! Access logging
//!
//! One JSON object per handled request, appended to a JSONL file. The file
//! opens lazily on the first write; a single mutex serializes writers so
//! concurrent connection threads never interleave lines.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// One access-log line.
#[derive(Debug, Serialize)]
pub struct AccessLogEntry<'a> {
    /// ISO-8601 UTC timestamp
    pub ts: String,
    /// Client IP
    pub ip: String,
    pub method: &'a str,
    pub path: &'a str,
    pub status: u16,
    pub length: u64,
}

impl<'a> AccessLogEntry<'a> {
    /// Stamp an entry with the current time.
    pub fn now(ip: String, method: &'a str, path: &'a str, status: u16, length: u64) -> Self {
        AccessLogEntry {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            ip,
            method,
            path,
            status,
            length,
        }
    }
}

/// Append-only JSONL access log.
pub struct AccessLog {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl AccessLog {
    /// Set up a log at `path`. Nothing is opened or created until the first
    /// write.
    pub fn new(path: PathBuf) -> Self {
        AccessLog {
            path,
            file: Mutex::new(None),
        }
    }

    /// Append one entry.
    ///
    /// Logging failures must not take down request handling; they are
    /// reported as diagnostics and swallowed.
    pub fn write(&self, entry: &AccessLogEntry<'_>) {
        if let Err(e) = self.try_write(entry) {
            warn!(cause = %e, "access log write failed");
        }
    }

    fn try_write(&self, entry: &AccessLogEntry<'_>) -> std::io::Result<()> {
        let mut guard = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if guard.is_none() {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            *guard = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }

        if let Some(file) = guard.as_mut() {
            let line = serde_json::to_string(entry)?;
            writeln!(file, "{line}")?;
        }
        Ok(())
    }
}
