//! Pump decoded facts from the transport into outbound write requests.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use edit_bridge::wire::EditFact;

use crate::agent::SessionAgent;
use crate::protocol::{self, METHOD_WRITE_TEXT_FILE};

/// Consumes facts as they arrive and emits one `fs/write_text_file` request
/// per applicable fact. Runs detached from the listener's read loop, so a
/// slow client write never stalls connection intake. Facts are applied in
/// arrival order with no sequence numbering; a later fact for the same file
/// simply overwrites.
pub fn spawn_fact_pump(
    agent: Arc<Mutex<SessionAgent>>,
    mut facts: UnboundedReceiver<EditFact>,
    outgoing: UnboundedSender<String>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut next_request_id: i64 = 1;

        while let Some(fact) = facts.recv().await {
            let params = lock_unpoisoned(&agent).write_text_file_params(&fact);
            let Some(params) = params else {
                continue;
            };

            match protocol::request_line(next_request_id, METHOD_WRITE_TEXT_FILE, params) {
                Ok(line) => {
                    next_request_id += 1;
                    if outgoing.send(line).is_err() {
                        tracing::warn!("outgoing writer is gone; stopping fact pump");
                        return;
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, "failed to serialize write request");
                }
            }
        }
    })
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
