//! Parser for merged M3U playlist documents.
//!
//! Scans a merged document line by line, carrying the group/name declared
//! by the most recent `#EXTINF` directive into the URL lines that follow
//! it. Every URL line becomes one [`PlaylistEntry`] tagged with the next
//! sequential index, so the original document order can be restored after
//! shuffled, concurrent probing.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::entry::{DEFAULT_GROUP, DEFAULT_NAME, PlaylistEntry};

/// Matches the quoted group attribute on a directive line.
#[allow(clippy::expect_used)]
static GROUP_TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"group-title="(.*?)""#).expect("group-title regex is valid") // Static pattern, safe to panic
});

/// Matches the display name after the last comma on a directive line.
#[allow(clippy::expect_used)]
static DISPLAY_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",([^,]*)$").expect("display name regex is valid"));

/// Extracts the trimmed display name from a directive line, if present.
///
/// Shared with feed normalization, which rewrites upstream directive lines
/// around the same name extraction.
pub(crate) fn display_name(line: &str) -> Option<&str> {
    DISPLAY_NAME_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Parses a merged playlist document into ordered entries.
///
/// Directive lines (`#EXTINF…`) update the current group/name state; if
/// either attribute pattern fails to match, that half of the state keeps
/// its prior value (placeholder `"Unknown"` before the first match). Any
/// other non-empty line not starting with `#` is a URL line and produces
/// one entry with the next unused index. The `#EXTM3U` header, section
/// separators, comments, and blank lines never produce entries.
///
/// Parsing the same document twice yields identical index assignment.
#[must_use]
pub fn parse_playlist(text: &str) -> Vec<PlaylistEntry> {
    let mut entries = Vec::new();
    let mut current_group = DEFAULT_GROUP.to_string();
    let mut current_name = DEFAULT_NAME.to_string();
    let mut next_index = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with("#EXTINF") {
            match GROUP_TITLE_PATTERN.captures(line) {
                Some(caps) => current_group = caps[1].to_string(),
                None => debug!(line, "directive line without group attribute"),
            }
            match display_name(line) {
                Some(name) => current_name = name.to_string(),
                None => debug!(line, "directive line without display name"),
            }
        } else if !line.is_empty() && !line.starts_with('#') {
            entries.push(PlaylistEntry::new(
                next_index,
                current_group.clone(),
                current_name.clone(),
                line,
            ));
            next_index += 1;
        }
    }

    entries
}
