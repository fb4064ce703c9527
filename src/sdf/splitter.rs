//! Split multi-record SDF text into records.

use std::borrow::Cow;

use crate::utils::config::{RECORD_DELIMITER, RECORD_DELIMITER_LINE};

/// Convert CRLF line endings to LF. Borrows when the text has none.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Drop a delimiter that ends the text without its newline (last record of a file written
/// without a final newline).
fn strip_dangling_delimiter(fragment: &str) -> &str {
    if fragment == RECORD_DELIMITER {
        return "";
    }
    match fragment.strip_suffix(RECORD_DELIMITER) {
        Some(rest) if rest.ends_with('\n') => rest,
        _ => fragment,
    }
}

/// Split `text` on the delimiter line. Every yielded record ends with `$$$$\n` so it can be
/// parsed (or stored) on its own; empty and whitespace-only fragments are skipped.
/// Expects LF line endings; see [`normalize_line_endings`].
pub fn split_records(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(RECORD_DELIMITER_LINE)
        .map(strip_dangling_delimiter)
        .filter(|fragment| !fragment.trim().is_empty())
        .map(|fragment| format!("{fragment}{RECORD_DELIMITER_LINE}"))
}
