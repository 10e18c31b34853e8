//! Feed aggregation: download configured feeds into one merged document.
//!
//! Each configured feed is fetched and textually normalized, then all
//! feeds are concatenated (in config order, under section separators) into
//! the merged source document the parser consumes. One unreachable feed
//! contributes nothing and never affects the others; only an empty feed
//! mapping or an unwritable output path is fatal.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::playlist::{DEFAULT_NAME, PLAYLIST_HEADER, display_name};
use crate::probe::HttpClient;

/// Errors that abort feed aggregation entirely.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// No feeds are configured; nothing to aggregate.
    #[error("no sources configured: nothing to aggregate")]
    NoSources,

    /// File system error while writing the merged document.
    #[error("IO error writing merged document to {path}: {source}")]
    Io {
        /// The output path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Per-run aggregation counts, for the final log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateSummary {
    /// Feeds fetched and merged successfully.
    pub fetched: usize,
    /// Feeds that failed to download or returned an error status.
    pub failed: usize,
    /// Feeds skipped because their URL has no recognized network scheme.
    pub skipped: usize,
}

/// Returns true if the feed URL uses a recognized network scheme.
fn is_network_url(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Normalizes one feed's text so every directive carries the configured
/// category as its group.
///
/// Line rules, in order:
/// - blank lines and `#EXTM3U` headers are dropped;
/// - `#EXTINF` lines are rewritten as
///   `#EXTINF:-1 group-title="<category>",<name>`, where the name is the
///   text after the last comma (placeholder when absent);
/// - `name,http…` CSV lines expand into a directive plus URL line pair;
///   CSV lines whose second field does not look like an http URL are
///   dropped;
/// - other non-comment lines (bare URLs) pass through unchanged;
/// - all remaining comment lines are dropped.
#[must_use]
pub fn normalize_feed(category: &str, text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(PLAYLIST_HEADER) {
            continue;
        }

        if line.starts_with("#EXTINF") {
            let name = display_name(line).unwrap_or(DEFAULT_NAME);
            out.push_str(&format!("#EXTINF:-1 group-title=\"{category}\",{name}\n"));
        } else if !line.starts_with('#') {
            if let Some((name, url)) = line.split_once(',') {
                let url = url.trim();
                if url.starts_with("http") {
                    out.push_str(&format!(
                        "#EXTINF:-1 group-title=\"{category}\",{}\n{url}\n",
                        name.trim()
                    ));
                }
            } else {
                out.push_str(line);
                out.push('\n');
            }
        }
    }

    out
}

/// Downloads every configured feed and writes the merged source document.
///
/// Feeds are processed in config order. A feed that is skipped or fails
/// is logged and contributes no section; the merged document is written
/// regardless of how many feeds succeeded.
///
/// # Errors
///
/// Returns [`AggregateError::NoSources`] if the mapping is empty (fatal
/// before any network activity), or [`AggregateError::Io`] if the merged
/// document cannot be written.
pub async fn aggregate_feeds(
    client: &HttpClient,
    sources: &IndexMap<String, String>,
    output: &Path,
) -> Result<AggregateSummary, AggregateError> {
    if sources.is_empty() {
        return Err(AggregateError::NoSources);
    }

    info!(feeds = sources.len(), "starting feed aggregation");

    let mut document = String::new();
    document.push_str(PLAYLIST_HEADER);
    document.push('\n');

    let mut summary = AggregateSummary::default();

    for (category, url) in sources {
        if !is_network_url(url) {
            warn!(category, url, "skipping feed without a network URL");
            summary.skipped += 1;
            continue;
        }

        info!(category, "downloading feed");
        match client.fetch_text(url).await {
            Ok((status, text)) if status.is_success() => {
                document.push_str(&format!("\n#------ {category} ------\n\n"));
                document.push_str(&normalize_feed(category, &text));
                summary.fetched += 1;
            }
            Ok((status, _)) => {
                warn!(category, url, status = status.as_u16(), "feed returned error status");
                summary.failed += 1;
            }
            Err(e) => {
                warn!(category, url, error = %e, "feed download failed");
                summary.failed += 1;
            }
        }
    }

    std::fs::write(output, &document).map_err(|source| AggregateError::Io {
        path: output.to_path_buf(),
        source,
    })?;

    info!(
        path = %output.display(),
        fetched = summary.fetched,
        failed = summary.failed,
        skipped = summary.skipped,
        "merged document written"
    );

    Ok(summary)
}
