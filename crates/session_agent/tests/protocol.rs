use serde_json::{json, Value};
use session_agent::agent::SessionAgent;
use session_agent::protocol::{dispatch, IncomingMessage};

fn request(id: i64, method: &str, params: Value) -> IncomingMessage {
    serde_json::from_value(json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
        .expect("request should deserialize")
}

fn parse(line: &str) -> Value {
    serde_json::from_str(line).expect("protocol line should be valid JSON")
}

#[test]
fn initialize_returns_protocol_version_and_capabilities() {
    let mut agent = SessionAgent::new();
    let lines = dispatch(&mut agent, request(1, "initialize", json!({"protocolVersion": 1})));

    assert_eq!(lines.len(), 1);
    let reply = parse(&lines[0]);
    assert_eq!(reply["id"], 1);
    assert_eq!(reply["result"]["protocolVersion"], 1);
    assert_eq!(reply["result"]["agentCapabilities"]["loadSession"], true);
}

#[test]
fn session_new_replies_with_id_and_sets_active_session() {
    let mut agent = SessionAgent::new();
    let lines = dispatch(&mut agent, request(2, "session/new", json!({"cwd": "/workspace"})));

    let reply = parse(&lines[0]);
    let session_id = reply["result"]["sessionId"]
        .as_str()
        .expect("sessionId string");
    assert_eq!(agent.active_session_id(), Some(session_id));
    assert!(reply["result"]["configOptions"].as_array().expect("array").is_empty());
}

#[test]
fn session_load_sets_requested_id() {
    let mut agent = SessionAgent::new();
    let lines = dispatch(
        &mut agent,
        request(3, "session/load", json!({"sessionId": "ses_42", "cwd": "/workspace"})),
    );

    assert_eq!(parse(&lines[0])["id"], 3);
    assert_eq!(agent.active_session_id(), Some("ses_42"));
}

#[test]
fn prompt_streams_one_chunk_then_ends_turn() {
    let mut agent = SessionAgent::new();
    agent.load_session("ses_1", "/workspace");
    let lines = dispatch(
        &mut agent,
        request(4, "session/prompt", json!({"sessionId": "ses_1", "prompt": []})),
    );

    assert_eq!(lines.len(), 2);

    let update = parse(&lines[0]);
    assert_eq!(update["method"], "session/update");
    assert_eq!(update["params"]["sessionId"], "ses_1");
    assert_eq!(
        update["params"]["update"]["sessionUpdate"],
        "agent_message_chunk"
    );
    assert!(update.get("id").is_none(), "update is a notification");

    let reply = parse(&lines[1]);
    assert_eq!(reply["id"], 4);
    assert_eq!(reply["result"]["stopReason"], "end_turn");
}

#[test]
fn authenticate_and_set_mode_return_empty_results() {
    let mut agent = SessionAgent::new();

    let auth = dispatch(&mut agent, request(5, "authenticate", json!({"methodId": "none"})));
    assert_eq!(parse(&auth[0])["result"], json!({}));

    let mode = dispatch(
        &mut agent,
        request(6, "session/set_mode", json!({"sessionId": "s", "modeId": "plan"})),
    );
    assert_eq!(parse(&mode[0])["result"], json!({}));
}

#[test]
fn cancel_notification_produces_no_reply() {
    let mut agent = SessionAgent::new();
    let message: IncomingMessage = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": "session/cancel",
        "params": {"sessionId": "ses_1"}
    }))
    .expect("notification should deserialize");

    assert!(dispatch(&mut agent, message).is_empty());
}

#[test]
fn unknown_method_gets_method_not_found() {
    let mut agent = SessionAgent::new();
    let lines = dispatch(&mut agent, request(7, "session/fork", json!({})));

    let reply = parse(&lines[0]);
    assert_eq!(reply["error"]["code"], -32601);
}
