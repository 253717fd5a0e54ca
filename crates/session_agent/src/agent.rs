//! Session surface state: one tracked active session and stub lifecycle
//! handlers for the external client protocol.

use serde_json::{json, Value};
use uuid::Uuid;

use edit_bridge::wire::EditFact;

/// Text returned for every prompt; this agent only mirrors edits.
pub const PROMPT_REPLY_TEXT: &str = "drive edits through the automation agent directly";

/// At most one session is live at a time. Creating or loading a session
/// replaces the tracked id; incoming facts are only applied while one is
/// set. There is no queueing for a not-yet-ready session.
#[derive(Debug, Default)]
pub struct SessionAgent {
    active_session_id: Option<String>,
}

impl SessionAgent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active_session_id(&self) -> Option<&str> {
        self.active_session_id.as_deref()
    }

    pub fn initialize(&self, protocol_version: Option<u64>) -> Value {
        tracing::debug!(?protocol_version, "client initialized");
        json!({
            "protocolVersion": 1,
            "agentCapabilities": {"loadSession": true}
        })
    }

    pub fn new_session(&mut self, cwd: &str) -> Value {
        let session_id = Uuid::new_v4().to_string();
        tracing::info!(%session_id, cwd, "session created");
        self.active_session_id = Some(session_id.clone());
        json!({"sessionId": session_id, "configOptions": []})
    }

    pub fn load_session(&mut self, session_id: &str, cwd: &str) -> Value {
        tracing::info!(%session_id, cwd, "session loaded");
        self.active_session_id = Some(session_id.to_string());
        json!({"configOptions": []})
    }

    pub fn authenticate(&self, method_id: &str) -> Value {
        tracing::debug!(method_id, "authentication request acknowledged");
        json!({})
    }

    pub fn set_session_mode(&self, session_id: &str, mode_id: &str) -> Value {
        tracing::debug!(session_id, mode_id, "session mode switched");
        json!({})
    }

    pub fn cancel(&self, session_id: &str) {
        tracing::debug!(session_id, "cancel requested");
    }

    /// Builds the outbound write request for a fact, or drops it.
    ///
    /// A missing active session is a transient startup state, not an error;
    /// the fact is discarded with a warning.
    pub fn write_text_file_params(&self, fact: &EditFact) -> Option<Value> {
        match &self.active_session_id {
            Some(session_id) => Some(json!({
                "sessionId": session_id,
                "path": fact.file,
                "content": fact.content_new,
            })),
            None => {
                tracing::warn!(file = %fact.file, "no active session; dropping edit fact");
                None
            }
        }
    }
}
