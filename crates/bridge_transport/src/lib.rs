//! Loopback transport for edit facts.
//!
//! This crate owns socket behavior only: the sender side (fresh connection
//! per attempt, bounded retries with linear backoff) and the listener side
//! (per-connection line reassembly, per-line fault isolation). The wire
//! schema itself lives in `edit_bridge::wire`; both roles share it through
//! this crate's re-exports.

pub mod error;
pub mod receiver;
pub mod retry;
pub mod sender;

pub use error::TransportError;
pub use receiver::{FactListener, IDLE_TIMEOUT};
pub use retry::{backoff_delay, ATTEMPT_TIMEOUT, BASE_BACKOFF_MS, MAX_SEND_ATTEMPTS};
pub use sender::FactSender;
