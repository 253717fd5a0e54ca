//! Fact sender: one fresh loopback connection per attempt, bounded retries.

use std::net::SocketAddr;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpSocket;
use tokio::time::timeout;

use edit_bridge::wire::{encode_fact_line, EditFact};
use edit_bridge::BridgeConfig;

use crate::error::TransportError;
use crate::retry::{backoff_delay, ATTEMPT_TIMEOUT, MAX_SEND_ATTEMPTS};

/// Sends facts to the receiver role over loopback TCP.
///
/// Each call serializes the fact once and walks the retry schedule; the
/// caller awaits the full schedule and, on exhaustion, only logs. Delivery
/// is fire-and-forget from the event handler's point of view.
#[derive(Debug, Clone)]
pub struct FactSender {
    addr: SocketAddr,
}

impl FactSender {
    #[must_use]
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            addr: config.loopback_addr(),
        }
    }

    #[must_use]
    pub fn for_addr(addr: SocketAddr) -> Self {
        Self { addr }
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Delivers one fact, retrying with linear backoff.
    ///
    /// Returns `Ok(())` after the first successful attempt. After
    /// [`MAX_SEND_ATTEMPTS`] failures the last error is folded into
    /// [`TransportError::RetriesExhausted`]; nothing is re-raised past the
    /// returned value and the fact is simply gone.
    pub async fn send(&self, fact: &EditFact) -> Result<(), TransportError> {
        let line = encode_fact_line(fact).map_err(|source| TransportError::Serialize {
            file: fact.file.clone(),
            source,
        })?;

        let mut last_error = String::from("no attempt made");
        for attempt in 1..=MAX_SEND_ATTEMPTS {
            match self.attempt_send(&line).await {
                Ok(()) => return Ok(()),
                Err(error) => {
                    tracing::debug!(attempt, file = %fact.file, %error, "fact send attempt failed");
                    last_error = error.to_string();
                }
            }

            if attempt < MAX_SEND_ATTEMPTS {
                tokio::time::sleep(backoff_delay(attempt)).await;
            }
        }

        Err(TransportError::RetriesExhausted {
            attempts: MAX_SEND_ATTEMPTS,
            last_error,
        })
    }

    /// One connection lifecycle: connect, write the line, shut down.
    async fn attempt_send(&self, line: &str) -> Result<(), TransportError> {
        let socket = TcpSocket::new_v4().map_err(TransportError::Socket)?;
        socket.set_keepalive(true).map_err(TransportError::Socket)?;

        let mut stream = timeout(ATTEMPT_TIMEOUT, socket.connect(self.addr))
            .await
            .map_err(|_| TransportError::timeout("connecting", ATTEMPT_TIMEOUT))?
            .map_err(|source| TransportError::Connect {
                addr: self.addr,
                source,
            })?;
        stream.set_nodelay(true).map_err(TransportError::Socket)?;

        timeout(ATTEMPT_TIMEOUT, stream.write_all(line.as_bytes()))
            .await
            .map_err(|_| TransportError::timeout("writing", ATTEMPT_TIMEOUT))?
            .map_err(TransportError::Write)?;
        timeout(ATTEMPT_TIMEOUT, stream.shutdown())
            .await
            .map_err(|_| TransportError::timeout("closing", ATTEMPT_TIMEOUT))?
            .map_err(TransportError::Write)?;

        Ok(())
    }
}
