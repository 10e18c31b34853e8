//! Types representing playlist entries.

use std::fmt;

/// Placeholder group used when no directive line preceded a URL line.
pub const DEFAULT_GROUP: &str = "Unknown";

/// Placeholder display name used when no directive line preceded a URL line.
pub const DEFAULT_NAME: &str = "Unknown";

/// A single channel entry parsed from a merged playlist document.
///
/// The `index` is assigned strictly in document scan order and is never
/// reassigned afterward; it is what lets the writer restore the original
/// ordering after the working list has been shuffled and probed
/// concurrently. Only `url` may be rewritten after parsing (to the
/// canonical post-redirect URL when a probe accepts the entry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Position of this entry in the source document (0-based, unique).
    pub index: usize,
    /// Group title, from the nearest preceding directive line.
    pub group: String,
    /// Display name, from the nearest preceding directive line.
    pub name: String,
    /// Stream URL. Rewritten to the canonical redirect target on acceptance.
    pub url: String,
}

impl PlaylistEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(
        index: usize,
        group: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            index,
            group: group.into(),
            name: name.into(),
            url: url.into(),
        }
    }

    /// Renders the `#EXTINF` directive line for this entry.
    #[must_use]
    pub fn directive_line(&self) -> String {
        format!("#EXTINF:-1 group-title=\"{}\",{}", self.group, self.name)
    }
}

impl fmt::Display for PlaylistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.group, self.name, self.url)
    }
}
