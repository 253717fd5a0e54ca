//! Mode-gated lifecycle event handling for the emitter role.

use std::path::Path;

use bridge_transport::FactSender;
use edit_bridge::diff::extract_diff_info;
use edit_bridge::pending::PendingEditStore;
use edit_bridge::reconcile::reconcile;
use edit_bridge::sidelog::{SideLog, SideLogEvent};
use edit_bridge::wire::EditFact;
use edit_bridge::EditPermissionMode;

use crate::events::{
    LifecycleEvent, PermissionAskedProperties, PermissionRepliedProperties, ToolPart,
    PART_TOOL, REPLY_APPLY_ONCE, STATUS_COMPLETED, STATUS_RUNNING, TOOL_EDIT, TOOL_WRITE,
};

/// Side log file name for this role.
pub const EMITTER_SIDE_LOG_FILE: &str = "emitter.log";

/// Sequential event handler owned by the emitter's single dispatch task.
///
/// The permission mode is fixed at construction and selects which event
/// family is live: direct mode acts on tool progress and ignores permission
/// events; gated mode does the reverse. The pending store needs no lock
/// because no await point sits between its lookup and its mutation.
pub struct EmitterHandler {
    mode: EditPermissionMode,
    sender: FactSender,
    pending: PendingEditStore,
    side_log: Option<SideLog>,
}

impl EmitterHandler {
    #[must_use]
    pub fn new(mode: EditPermissionMode, sender: FactSender, side_log: Option<SideLog>) -> Self {
        Self {
            mode,
            sender,
            pending: PendingEditStore::new(),
            side_log,
        }
    }

    #[must_use]
    pub fn mode(&self) -> EditPermissionMode {
        self.mode
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub async fn handle(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::MessagePartUpdated { properties } if !self.mode.is_gated() => {
                self.on_tool_progress(properties.part).await;
            }
            LifecycleEvent::PermissionAsked { properties } if self.mode.is_gated() => {
                self.on_permission_asked(properties).await;
            }
            LifecycleEvent::PermissionReplied { properties } if self.mode.is_gated() => {
                self.on_permission_replied(properties).await;
            }
            _ => {}
        }
    }

    async fn on_tool_progress(&self, part: ToolPart) {
        if part.kind != PART_TOOL {
            return;
        }

        let input = &part.state.input;
        match (part.tool.as_str(), part.state.status.as_str()) {
            (TOOL_EDIT, STATUS_RUNNING) => {
                if input.file_path.is_empty() {
                    return;
                }
                self.transmit(input.file_path.clone(), input.new_string.clone())
                    .await;
            }
            (TOOL_WRITE, STATUS_COMPLETED) => {
                if input.file_path.is_empty() {
                    return;
                }
                // The editor surface owns the final write; the tool's
                // on-disk copy is reset before the fact goes out.
                if let Err(error) = tokio::fs::write(&input.file_path, "").await {
                    tracing::warn!(file = %input.file_path, %error, "failed to reset written file");
                }
                self.transmit(input.file_path.clone(), input.content.clone())
                    .await;
            }
            _ => {}
        }
    }

    async fn on_permission_asked(&mut self, properties: PermissionAskedProperties) {
        let raw_diff = properties.metadata.diff;
        if raw_diff.is_empty() {
            return;
        }

        let info = extract_diff_info(&raw_diff);
        let Some(file_path) = info.file_path else {
            // Expected for deletion/creation-only diffs; not worth a log line.
            return;
        };

        let content_old = match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => content,
            Err(_) => {
                self.record(SideLogEvent::MissingBaseFile {
                    path: file_path.clone(),
                });
                String::new()
            }
        };

        if let Some(patched) = reconcile(&content_old, &info.normalized_diff) {
            self.pending.put(properties.id, file_path, patched);
        }
    }

    async fn on_permission_replied(&mut self, properties: PermissionRepliedProperties) {
        if properties.reply != REPLY_APPLY_ONCE {
            return;
        }

        let Some(pending) = self.pending.take(&properties.request_id) else {
            return;
        };

        ensure_file_exists(&pending.file).await;
        self.record(SideLogEvent::AppliedPendingEdit {
            file: pending.file.clone(),
            content_new: pending.content_new.clone(),
        });
        self.transmit(pending.file, pending.content_new).await;
    }

    async fn transmit(&self, file: String, content_new: String) {
        let fact = EditFact::new(file, content_new);
        if let Err(error) = self.sender.send(&fact).await {
            tracing::warn!(file = %fact.file, %error, "fact delivery abandoned");
            self.record(SideLogEvent::SendRetriesExhausted { file: fact.file });
        }
    }

    fn record(&self, event: SideLogEvent) {
        if let Some(side_log) = &self.side_log {
            if let Err(error) = side_log.append(&event) {
                tracing::warn!(%error, "side log append failed");
            }
        }
    }
}

/// The receiver writes into the live buffer, not onto disk; a granted edit
/// for a brand-new file still needs an on-disk file for the surface to open.
async fn ensure_file_exists(path: &str) {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        return;
    }

    if let Some(parent) = Path::new(path).parent() {
        if let Err(error) = tokio::fs::create_dir_all(parent).await {
            tracing::warn!(file = %path, %error, "failed to create parent directory");
            return;
        }
    }
    if let Err(error) = tokio::fs::write(path, "").await {
        tracing::warn!(file = %path, %error, "failed to create empty file");
    }
}
