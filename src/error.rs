use std::path::PathBuf;

use thiserror::Error;

/// Failures while appending to the diagnostic side log.
///
/// The log is a write-only audit trail; callers warn and continue on every
/// variant rather than propagating.
#[derive(Debug, Error)]
pub enum SideLogError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize side log event: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to format current UTC timestamp as RFC3339: {0}")]
    ClockFormat(#[source] time::error::Format),
}

impl SideLogError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
