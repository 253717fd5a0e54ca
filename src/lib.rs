//! Edit-synchronization bridge core.
//!
//! This crate owns the pure logic of the bridge: turning a unified diff into
//! a target path and a normalized patch body, reconciling a patch against
//! prior file content, correlating computed edits with permission requests,
//! and the wire schema plus line framing both roles agree on. It performs no
//! socket I/O; the transport lives in `bridge_transport`, and the two
//! process roles live in `emitter_plugin` and `session_agent`.
//!
//! Design note: failure here degrades silently by contract. An unresolvable
//! diff path or a patch that no longer applies produces no fact and no
//! error; only the side log records what was dropped.

pub mod config;
pub mod diff;
pub mod error;
pub mod paths;
pub mod pending;
pub mod reconcile;
pub mod sidelog;
pub mod wire;

pub use config::{BridgeConfig, EditPermissionMode};
pub use diff::{extract_diff_info, normalize_diff, normalize_newlines, DiffInfo};
pub use error::SideLogError;
pub use pending::{PendingEdit, PendingEditStore};
pub use reconcile::reconcile;
pub use sidelog::{SideLog, SideLogEvent};
pub use wire::{decode_fact_line, encode_fact_line, BridgeMessage, EditFact, LineAssembler};
