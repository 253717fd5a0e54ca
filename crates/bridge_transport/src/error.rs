use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open socket: {0}")]
    Socket(#[source] std::io::Error),

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write fact line: {0}")]
    Write(#[source] std::io::Error),

    #[error("attempt exceeded {timeout:?} while {operation}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("failed to serialize fact for {file}: {source}")]
    Serialize {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("send retries exhausted after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

impl TransportError {
    #[must_use]
    pub fn timeout(operation: &'static str, timeout: Duration) -> Self {
        Self::Timeout { operation, timeout }
    }
}
