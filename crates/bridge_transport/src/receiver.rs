//! Fact listener: accepts loopback connections and reassembles fact lines.
//!
//! Every connection gets its own buffer and its own task; a parse failure on
//! one line never disturbs later lines, other connections, or the accept
//! loop. Decoded facts go out through an unbounded channel so a slow
//! consumer cannot stall intake.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::timeout;

use edit_bridge::wire::{decode_fact_line, EditFact, LineAssembler};
use edit_bridge::BridgeConfig;

use crate::error::TransportError;

/// How long a connection may sit idle before it is force-closed.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(5);

const READ_CHUNK_BYTES: usize = 4096;

/// Loopback listener for the receiver role.
pub struct FactListener {
    listener: TcpListener,
    idle_timeout: Duration,
}

impl FactListener {
    /// Binds the listener on the configured loopback port.
    pub async fn bind(config: &BridgeConfig) -> Result<Self, TransportError> {
        let addr = config.loopback_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| TransportError::Bind { addr, source })?;
        Ok(Self {
            listener,
            idle_timeout: IDLE_TIMEOUT,
        })
    }

    /// Bound address; useful when the config requested port 0.
    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        self.listener.local_addr().map_err(TransportError::Socket)
    }

    #[must_use]
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Accept loop. Runs until the task is dropped; every connection is
    /// served concurrently with independent buffering state.
    pub async fn run(self, facts: UnboundedSender<EditFact>) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    tracing::debug!(%peer, "bridge connection accepted");
                    let facts = facts.clone();
                    let idle_timeout = self.idle_timeout;
                    tokio::spawn(async move {
                        handle_connection(stream, facts, idle_timeout).await;
                    });
                }
                Err(error) => {
                    tracing::warn!(%error, "bridge accept failed");
                }
            }
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    facts: UnboundedSender<EditFact>,
    idle_timeout: Duration,
) {
    let _ = stream.set_nodelay(true);
    let mut assembler = LineAssembler::default();
    let mut chunk = [0u8; READ_CHUNK_BYTES];

    loop {
        let read = match timeout(idle_timeout, stream.read(&mut chunk)).await {
            // Idle connections are destroyed without draining the buffer.
            Err(_) => {
                tracing::debug!("bridge connection idle timeout");
                return;
            }
            Ok(Err(error)) => {
                tracing::warn!(%error, "bridge connection read failed");
                return;
            }
            Ok(Ok(0)) => break,
            Ok(Ok(read)) => read,
        };

        for line in assembler.feed(&chunk[..read]) {
            dispatch_line(&line, &facts);
        }
    }

    // Clean close: residue without a trailing newline is still a line.
    if let Some(line) = assembler.finish() {
        dispatch_line(&line, &facts);
    }
}

fn dispatch_line(line: &str, facts: &UnboundedSender<EditFact>) {
    match decode_fact_line(line) {
        Ok(Some(fact)) => {
            if facts.send(fact).is_err() {
                tracing::warn!("fact consumer is gone; dropping fact");
            }
        }
        Ok(None) => {}
        Err(error) => {
            tracing::warn!(%error, "dropping malformed bridge line");
        }
    }
}
