use std::sync::{Arc, Mutex};

use bridge_transport::FactListener;
use edit_bridge::BridgeConfig;
use session_agent::agent::SessionAgent;
use session_agent::intake::{lock_unpoisoned, spawn_fact_pump};
use session_agent::protocol::{dispatch, IncomingMessage};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = BridgeConfig::from_env();
    let agent = Arc::new(Mutex::new(SessionAgent::new()));

    // Single writer task owns stdout so protocol lines never interleave.
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = out_rx.recv().await {
            if stdout.write_all(line.as_bytes()).await.is_err()
                || stdout.write_all(b"\n").await.is_err()
                || stdout.flush().await.is_err()
            {
                return;
            }
        }
    });

    let listener = FactListener::bind(&config).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening for edit facts");
    let (fact_tx, fact_rx) = mpsc::unbounded_channel();
    tokio::spawn(listener.run(fact_tx));
    spawn_fact_pump(Arc::clone(&agent), fact_rx, out_tx.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<IncomingMessage>(line) {
            Ok(message) => {
                let replies = dispatch(&mut lock_unpoisoned(&agent), message);
                for reply in replies {
                    if out_tx.send(reply).is_err() {
                        anyhow::bail!("stdout writer stopped");
                    }
                }
            }
            // Client responses to our own requests land here; nothing to do.
            Err(error) => tracing::debug!(%error, "ignoring non-request client line"),
        }
    }

    tracing::info!("client closed stdin; shutting down");
    Ok(())
}
