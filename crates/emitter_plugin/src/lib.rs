//! Emitter role: observes host lifecycle events and transmits edit facts.
//!
//! The binary reads newline-delimited event envelopes from the host runtime
//! on stdin. Which events matter is fixed at startup by the permission mode:
//!
//! - direct mode: tool edit/write progress drives immediate facts
//! - gated mode: permission ask/reply drives the pending-edit lifecycle
//!
//! Delivery problems never propagate to the host; they end in the side log.

pub mod events;
pub mod handler;

pub use events::{EventEnvelope, LifecycleEvent};
pub use handler::{EmitterHandler, EMITTER_SIDE_LOG_FILE};
