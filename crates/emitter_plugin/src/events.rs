//! Lifecycle event shapes dispatched by the host plugin runtime.
//!
//! The host wraps every event in an envelope and tags it with a dotted
//! discriminant. Payload fields beyond what the bridge consumes are accepted
//! and ignored; fields the host may omit while a tool call is still
//! streaming default to empty.

use serde::Deserialize;

/// Tool name carried by in-place string replacement events.
pub const TOOL_EDIT: &str = "edit";
/// Tool name carried by whole-file write events.
pub const TOOL_WRITE: &str = "write";
/// Part discriminant for tool progress parts.
pub const PART_TOOL: &str = "tool";
/// Edit-tool status at which the replacement input is complete.
pub const STATUS_RUNNING: &str = "running";
/// Write-tool status at which the full content is final.
pub const STATUS_COMPLETED: &str = "completed";
/// Permission reply disposition that grants one-time application.
pub const REPLY_APPLY_ONCE: &str = "once";

/// Outer wrapper the host puts around every dispatched event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventEnvelope {
    pub event: LifecycleEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum LifecycleEvent {
    #[serde(rename = "message.part.updated")]
    MessagePartUpdated { properties: ToolPartProperties },
    #[serde(rename = "permission.asked")]
    PermissionAsked { properties: PermissionAskedProperties },
    #[serde(rename = "permission.replied")]
    PermissionReplied { properties: PermissionRepliedProperties },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolPartProperties {
    pub part: ToolPart,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolPart {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub tool: String,
    #[serde(rename = "sessionID", default)]
    pub session_id: String,
    #[serde(default)]
    pub state: ToolState,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct ToolState {
    pub status: String,
    pub input: ToolInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct ToolInput {
    pub content: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "oldString")]
    pub old_string: String,
    #[serde(rename = "newString")]
    pub new_string: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PermissionAskedProperties {
    pub id: String,
    #[serde(rename = "sessionID", default)]
    pub session_id: String,
    #[serde(default)]
    pub metadata: PermissionMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct PermissionMetadata {
    pub filepath: String,
    pub diff: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PermissionRepliedProperties {
    #[serde(rename = "requestID")]
    pub request_id: String,
    #[serde(rename = "sessionID", default)]
    pub session_id: String,
    pub reply: String,
}
