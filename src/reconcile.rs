//! Patch reconciliation: prior file content + normalized diff -> new content.
//!
//! Application itself is delegated to `diffy`; this module only guarantees
//! that both inputs reach the primitive newline-normalized and that any
//! parse or context failure collapses to "no fact produced".

use diffy::Patch;

use crate::diff::normalize_newlines;

/// Applies a normalized unified diff to the prior file content.
///
/// Returns the patched content, or `None` when the diff fails to parse or
/// does not apply cleanly against the supplied base (for example when the
/// base drifted since the diff was captured). Callers pass an empty base for
/// files that do not exist yet.
pub fn reconcile(content_old: &str, normalized_diff: &str) -> Option<String> {
    let base = normalize_newlines(content_old);
    let diff = normalize_newlines(normalized_diff);
    let patch = Patch::from_str(&diff).ok()?;
    diffy::apply(&base, &patch).ok()
}
