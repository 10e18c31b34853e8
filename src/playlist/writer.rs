//! Order-restoring playlist writer.
//!
//! The validated entry collection arrives in shuffle-plus-completion order.
//! The writer sorts by the index assigned at parse time, so the output is
//! byte-for-byte identical across runs over the same input and the same
//! set of live URLs, regardless of shuffle randomness or probe timing.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::entry::PlaylistEntry;

/// Header line marking an M3U playlist document.
pub const PLAYLIST_HEADER: &str = "#EXTM3U";

/// Errors that can occur while writing the validated playlist.
#[derive(Debug, Error)]
pub enum WriteError {
    /// File system error while writing the output document.
    #[error("IO error writing playlist to {path}: {source}")]
    Io {
        /// The output path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Renders the surviving entries as an M3U document.
///
/// Entries are sorted strictly ascending by their parse-time index before
/// serialization; the input order (shuffle order, probe completion order)
/// has no effect on the output bytes.
#[must_use]
pub fn render_playlist(entries: &[PlaylistEntry]) -> String {
    let mut ordered: Vec<&PlaylistEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.index);

    let mut out = String::with_capacity(entries.len() * 64 + 16);
    out.push_str(PLAYLIST_HEADER);
    out.push('\n');
    for entry in ordered {
        out.push_str(&entry.directive_line());
        out.push('\n');
        out.push_str(&entry.url);
        out.push('\n');
    }
    out
}

/// Renders the surviving entries and writes them to `path`.
///
/// # Errors
///
/// Returns [`WriteError::Io`] if the document cannot be written.
pub fn write_playlist(path: &Path, entries: &[PlaylistEntry]) -> Result<(), WriteError> {
    let document = render_playlist(entries);
    std::fs::write(path, document).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), entries = entries.len(), "playlist written");
    Ok(())
}
