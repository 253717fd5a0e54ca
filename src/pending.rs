//! Correlation store for edits awaiting a permission decision.

use std::collections::HashMap;

/// A computed edit held back until its permission request is granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub file: String,
    pub content_new: String,
}

/// Request-id keyed map of pending edits, owned by the emitter's event
/// handler. Entries are created on permission-ask events and consumed exactly
/// once by a matching grant; replies with any other disposition leave the
/// entry in place, takeable by a later grant for the same id.
#[derive(Debug, Default)]
pub struct PendingEditStore {
    entries: HashMap<String, PendingEdit>,
}

impl PendingEditStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional upsert: a reused request id overwrites the old entry.
    pub fn put(
        &mut self,
        request_id: impl Into<String>,
        file: impl Into<String>,
        content_new: impl Into<String>,
    ) {
        self.entries.insert(
            request_id.into(),
            PendingEdit {
                file: file.into(),
                content_new: content_new.into(),
            },
        );
    }

    /// Removes and returns the entry for `request_id`, if any.
    pub fn take(&mut self, request_id: &str) -> Option<PendingEdit> {
        self.entries.remove(request_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
