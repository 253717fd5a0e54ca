use bridge_transport::FactSender;
use edit_bridge::sidelog::SideLog;
use edit_bridge::{BridgeConfig, EditPermissionMode};
use emitter_plugin::events::EventEnvelope;
use emitter_plugin::handler::{EmitterHandler, EMITTER_SIDE_LOG_FILE};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = BridgeConfig::from_env();
    let mode = EditPermissionMode::resolve();
    let side_log = SideLog::at_default_location(EMITTER_SIDE_LOG_FILE);
    if side_log.is_none() {
        tracing::warn!("no per-user data directory; side log disabled");
    }

    let mut handler = EmitterHandler::new(mode, FactSender::new(&config), side_log);
    tracing::info!(port = config.port, gated = mode.is_gated(), "emitter ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<EventEnvelope>(line) {
            Ok(envelope) => handler.handle(envelope.event).await,
            // The host dispatches many event kinds; only ours parse.
            Err(error) => tracing::debug!(%error, "ignoring unrecognized host line"),
        }
    }

    Ok(())
}
