//! Newline-delimited JSON-RPC surface for the external client.
//!
//! Only the method set below is served, each as a minimal valid stub; the
//! behaviorally significant ones are `session/new` and `session/load`, which
//! set the active session that gates fact application. Inbound lines that
//! are not requests (for example the client's responses to our own write
//! requests) fail to parse here and are ignored by the caller.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::agent::{SessionAgent, PROMPT_REPLY_TEXT};

pub const METHOD_INITIALIZE: &str = "initialize";
pub const METHOD_AUTHENTICATE: &str = "authenticate";
pub const METHOD_SESSION_NEW: &str = "session/new";
pub const METHOD_SESSION_LOAD: &str = "session/load";
pub const METHOD_SESSION_PROMPT: &str = "session/prompt";
pub const METHOD_SESSION_CANCEL: &str = "session/cancel";
pub const METHOD_SESSION_SET_MODE: &str = "session/set_mode";
/// Outbound notification streaming agent output to the client.
pub const METHOD_SESSION_UPDATE: &str = "session/update";
/// Outbound request asking the client to write into its live buffer.
pub const METHOD_WRITE_TEXT_FILE: &str = "fs/write_text_file";

/// An inbound request or notification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Serializes a response line for a served request.
pub fn response_line(id: &Value, result: Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(&json!({"jsonrpc": "2.0", "id": id, "result": result}))
}

/// Serializes an outbound request line.
pub fn request_line(id: i64, method: &str, params: Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(&json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
}

/// Serializes an outbound notification line.
pub fn notification_line(method: &str, params: Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(&json!({"jsonrpc": "2.0", "method": method, "params": params}))
}

fn error_line(id: &Value, code: i64, message: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string(&json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {"code": code, "message": message}
    }))
}

/// Routes one inbound message and returns the lines to write back, in order.
pub fn dispatch(agent: &mut SessionAgent, message: IncomingMessage) -> Vec<String> {
    let mut lines = Vec::new();
    let params = &message.params;

    match message.method.as_str() {
        METHOD_INITIALIZE => {
            let protocol_version = params.get("protocolVersion").and_then(Value::as_u64);
            push_response(&mut lines, &message.id, agent.initialize(protocol_version));
        }
        METHOD_AUTHENTICATE => {
            let method_id = str_param(params, "methodId");
            push_response(&mut lines, &message.id, agent.authenticate(method_id));
        }
        METHOD_SESSION_NEW => {
            let cwd = str_param(params, "cwd");
            push_response(&mut lines, &message.id, agent.new_session(cwd));
        }
        METHOD_SESSION_LOAD => {
            let session_id = str_param(params, "sessionId");
            let cwd = str_param(params, "cwd");
            push_response(&mut lines, &message.id, agent.load_session(session_id, cwd));
        }
        METHOD_SESSION_PROMPT => {
            // Stream one fixed chunk, then end the turn.
            let update = json!({
                "sessionId": str_param(params, "sessionId"),
                "update": {
                    "sessionUpdate": "agent_message_chunk",
                    "content": {"type": "text", "text": PROMPT_REPLY_TEXT}
                }
            });
            push_line(&mut lines, notification_line(METHOD_SESSION_UPDATE, update));
            push_response(&mut lines, &message.id, json!({"stopReason": "end_turn"}));
        }
        METHOD_SESSION_CANCEL => {
            agent.cancel(str_param(params, "sessionId"));
        }
        METHOD_SESSION_SET_MODE => {
            let session_id = str_param(params, "sessionId");
            let mode_id = str_param(params, "modeId");
            push_response(&mut lines, &message.id, agent.set_session_mode(session_id, mode_id));
        }
        other => {
            tracing::warn!(method = other, "unsupported client method");
            if let Some(id) = &message.id {
                push_line(&mut lines, error_line(id, -32601, "method not found"));
            }
        }
    }

    lines
}

fn str_param<'a>(params: &'a Value, key: &str) -> &'a str {
    params.get(key).and_then(Value::as_str).unwrap_or("")
}

fn push_response(lines: &mut Vec<String>, id: &Option<Value>, result: Value) {
    // Requests without an id are notifications and get no response frame.
    let Some(id) = id else {
        return;
    };
    push_line(lines, response_line(id, result));
}

fn push_line(lines: &mut Vec<String>, line: Result<String, serde_json::Error>) {
    match line {
        Ok(line) => lines.push(line),
        Err(error) => tracing::warn!(%error, "failed to serialize protocol line"),
    }
}
