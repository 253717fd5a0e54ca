//! Append-only diagnostic log under the per-user data directory.
//!
//! One RFC 3339 timestamp plus one JSON object per line. Nothing reads this
//! file back; it exists so silent degradation (dropped sends, missing base
//! files) leaves a trace.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::SideLogError;
use crate::paths;

/// Diagnostic events worth an audit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SideLogEvent {
    /// A permission-ask diff referenced a file that does not exist on disk;
    /// reconciliation proceeded against an empty base.
    MissingBaseFile { path: String },
    /// Every send attempt for a fact failed; the fact was dropped.
    SendRetriesExhausted { file: String },
    /// A granted pending edit was transmitted.
    AppliedPendingEdit { file: String, content_new: String },
}

/// Handle on one append-only log file.
#[derive(Debug, Clone)]
pub struct SideLog {
    path: PathBuf,
}

impl SideLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the conventionally-located log for this role, or `None` when
    /// no per-user data directory can be resolved.
    #[must_use]
    pub fn at_default_location(file_name: &str) -> Option<Self> {
        paths::side_log_path(file_name).map(Self::new)
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Appends one timestamped event line, creating the log directory on
    /// first use.
    pub fn append(&self, event: &SideLogEvent) -> Result<(), SideLogError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| SideLogError::io("creating log directory", parent, source))?;
        }

        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(SideLogError::ClockFormat)?;
        let payload = serde_json::to_string(event).map_err(SideLogError::Serialize)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| SideLogError::io("opening side log for append", &self.path, source))?;
        writeln!(file, "{timestamp} {payload}")
            .map_err(|source| SideLogError::io("appending side log line", &self.path, source))
    }
}
