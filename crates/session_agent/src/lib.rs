//! Receiver role: session surface for the editor host.
//!
//! Serves the client's session protocol as stubs over stdio while listening
//! for edit facts on the loopback bridge. The only state that matters is the
//! single active session id: facts arriving before a session exists are
//! dropped with a warning, never queued.

pub mod agent;
pub mod intake;
pub mod protocol;

pub use agent::SessionAgent;
pub use intake::spawn_fact_pump;
pub use protocol::{dispatch, IncomingMessage};
