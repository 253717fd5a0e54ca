//! Unified-diff normalization and header path extraction.
//!
//! Diffs arriving from tool metadata carry tool preamble (`Index:` lines,
//! `===` separators) and real header paths that patch application does not
//! need. Normalization strips the preamble and rewrites both header lines to
//! canonical placeholders; the real target path is extracted separately.

/// Canonical old-path header written into every normalized diff.
pub const PLACEHOLDER_OLD_HEADER: &str = "--- a/file.ts";
/// Canonical new-path header written into every normalized diff.
pub const PLACEHOLDER_NEW_HEADER: &str = "+++ b/file.ts";

/// Target path and patch body derived from a raw diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    /// Resolved target path, or `None` when no usable header is present or
    /// the headers point at `/dev/null`.
    pub file_path: Option<String>,
    /// Preamble-free, placeholder-headed, LF-only patch body.
    pub normalized_diff: String,
}

/// Converts CR-LF line endings to LF.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Produces the canonical form of a diff: LF-only, preamble lines removed,
/// first `---`/`+++` headers rewritten to placeholder paths.
///
/// Applying this transform to its own output is a no-op.
pub fn normalize_diff(diff: &str) -> String {
    let unified = normalize_newlines(diff);
    let mut rewrote_old = false;
    let mut rewrote_new = false;
    let mut lines = Vec::new();

    for line in unified.split('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with("Index:") || trimmed.starts_with("===") {
            continue;
        }

        if !rewrote_old && line.starts_with("--- ") {
            lines.push(PLACEHOLDER_OLD_HEADER);
            rewrote_old = true;
            continue;
        }

        if !rewrote_new && line.starts_with("+++ ") {
            lines.push(PLACEHOLDER_NEW_HEADER);
            rewrote_new = true;
            continue;
        }

        lines.push(line);
    }

    lines.join("\n")
}

/// Derives the target path and normalized patch body from a raw diff.
///
/// Path source order: `+++` header, then `---` header, then an `Index:`
/// preamble line. The fallback applies only when the preferred header is
/// absent; a header that resolves to `/dev/null` does not fall through.
pub fn extract_diff_info(raw_diff: &str) -> DiffInfo {
    let normalized = normalize_newlines(raw_diff);
    let lines: Vec<&str> = normalized.split('\n').collect();

    let plus_path = header_path(&lines, "+++");
    let minus_path = header_path(&lines, "---");
    let index_path = lines
        .iter()
        .find_map(|line| line.strip_prefix("Index: "))
        .map(|value| value.trim().to_string());

    let chosen = plus_path.or(minus_path).or(index_path);

    DiffInfo {
        file_path: chosen.as_deref().and_then(clean_path),
        normalized_diff: normalize_diff(&normalized),
    }
}

fn header_path(lines: &[&str], prefix: &str) -> Option<String> {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(prefix).and_then(|rest| rest.strip_prefix(' ')))
        .map(|value| value.trim().to_string())
}

fn clean_path(value: &str) -> Option<String> {
    let mut cleaned = value;
    while let Some(rest) = cleaned.strip_prefix("a/").or_else(|| cleaned.strip_prefix("b/")) {
        cleaned = rest;
    }

    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "/dev/null" || cleaned == "dev/null" {
        None
    } else {
        Some(cleaned.to_string())
    }
}
