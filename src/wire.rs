//! Wire schema and line framing for the loopback bridge.
//!
//! The channel carries newline-delimited UTF-8 JSON objects, one fact per
//! line, one-way and unacknowledged. Duplicate delivery is possible across
//! sender retries and must stay harmless for receivers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminant carried by every transmitted fact.
pub const FILE_EDITED_TYPE: &str = "file.edited";

/// A complete statement of a file's new content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditFact {
    pub file: String,
    #[serde(rename = "contentNew")]
    pub content_new: String,
}

impl EditFact {
    pub fn new(file: impl Into<String>, content_new: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            content_new: content_new.into(),
        }
    }
}

/// Envelope written to the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeMessage {
    #[serde(rename = "file.edited")]
    FileEdited { properties: EditFact },
}

/// Serializes one fact as a single newline-terminated JSON line.
pub fn encode_fact_line(fact: &EditFact) -> Result<String, serde_json::Error> {
    let message = BridgeMessage::FileEdited {
        properties: fact.clone(),
    };
    let mut line = serde_json::to_string(&message)?;
    line.push('\n');
    Ok(line)
}

/// Parses one inbound line.
///
/// Returns `Ok(Some(fact))` for a well-formed `file.edited` message,
/// `Ok(None)` for valid JSON carrying some other discriminant (ignored, not
/// an error), and `Err` for malformed JSON or a malformed properties payload.
pub fn decode_fact_line(line: &str) -> Result<Option<EditFact>, serde_json::Error> {
    let value: Value = serde_json::from_str(line)?;
    if value.get("type").and_then(Value::as_str) != Some(FILE_EDITED_TYPE) {
        return Ok(None);
    }

    let properties = value.get("properties").cloned().unwrap_or(Value::Null);
    serde_json::from_value::<EditFact>(properties).map(Some)
}

/// Incremental line reassembly for a single connection.
///
/// Feed arbitrary byte chunks and drain the complete, trimmed, non-empty
/// lines they contain; whatever trails the last newline stays buffered for
/// the next chunk. `finish` drains that residue when the peer closes without
/// a final newline.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buffer: String,
}

impl LineAssembler {
    /// Appends a chunk and returns every complete line it unlocked.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.push_str(&String::from_utf8_lossy(bytes));
        let mut lines = Vec::new();

        while let Some(split) = self.buffer.find('\n') {
            let line = self.buffer[..split].trim().to_string();
            self.buffer.drain(0..=split);
            if !line.is_empty() {
                lines.push(line);
            }
        }

        lines
    }

    /// Drains residual buffered content as a final line.
    pub fn finish(&mut self) -> Option<String> {
        let residue = std::mem::take(&mut self.buffer);
        let line = residue.trim();
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }

    #[must_use]
    pub fn is_empty_buffer(&self) -> bool {
        self.buffer.trim().is_empty()
    }
}
