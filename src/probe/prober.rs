//! Two-phase liveness probe for a single playlist entry.
//!
//! Phase one is a lightweight HEAD check that weeds out dead URLs without
//! transferring a body. Phase two is a streamed GET that confirms the URL
//! serves real content: a successful status, a non-empty body, and a body
//! that is not an HTML placeholder page. On acceptance the entry's URL is
//! rewritten to the GET's final post-redirect target.

use reqwest::StatusCode;

use super::client::HttpClient;
use super::error::{ContentIssue, ProbePhase, RejectReason};
use crate::playlist::PlaylistEntry;

/// How many body bytes the content check inspects.
pub const BODY_PROBE_LIMIT: usize = 1024;

/// Case-insensitive marker identifying an HTML placeholder page.
const HTML_DOCUMENT_MARKER: &[u8] = b"<!doctype html";

/// Result of probing one entry.
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    /// The stream is live; the entry carries its canonical URL.
    Accepted(PlaylistEntry),
    /// The stream is dead or not serving real content. The entry is kept
    /// alongside the reason so the scheduler can log the rejection before
    /// dropping it.
    Rejected {
        /// The probed entry, unchanged.
        entry: PlaylistEntry,
        /// Why the entry was rejected.
        reason: RejectReason,
    },
}

impl ValidationOutcome {
    /// Returns true if the entry was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Consumes the outcome, returning the accepted entry if any.
    #[must_use]
    pub fn into_accepted(self) -> Option<PlaylistEntry> {
        match self {
            Self::Accepted(entry) => Some(entry),
            Self::Rejected { .. } => None,
        }
    }
}

/// Inspects the first body bytes for disqualifying content.
///
/// An empty body means the server answered but has nothing to stream. A
/// body opening with `<!doctype html` (any case) is a placeholder or error
/// page masquerading as a stream, regardless of HTTP status.
fn content_issue(prefix: &[u8]) -> Option<ContentIssue> {
    if prefix.is_empty() {
        return Some(ContentIssue::EmptyBody);
    }
    if prefix.len() >= HTML_DOCUMENT_MARKER.len()
        && prefix[..HTML_DOCUMENT_MARKER.len()].eq_ignore_ascii_case(HTML_DOCUMENT_MARKER)
    {
        return Some(ContentIssue::HtmlPlaceholder);
    }
    None
}

/// Probes one entry and returns its validation outcome.
///
/// The two checks run under independent per-request timeouts (owned by the
/// client). Every network-level failure is caught here and resolved to a
/// [`RejectReason::TransientNetwork`] rejection; this function never
/// returns an error and never retries.
///
/// The HEAD check tolerates 405 Method Not Allowed: some stream servers
/// refuse HEAD outright but serve GET fine, and the GET check is the one
/// that decides. The canonical URL is always taken from the GET redirect
/// chain, never the HEAD chain.
pub async fn probe_entry(client: &HttpClient, mut entry: PlaylistEntry) -> ValidationOutcome {
    // Phase 1: lightweight existence check.
    let head_status = match client.head_status(&entry.url).await {
        Ok(status) => status,
        Err(e) => {
            return ValidationOutcome::Rejected {
                reason: RejectReason::network(ProbePhase::Head, &e),
                entry,
            };
        }
    };
    if head_status.as_u16() >= 400 && head_status != StatusCode::METHOD_NOT_ALLOWED {
        return ValidationOutcome::Rejected {
            reason: RejectReason::status(ProbePhase::Head, head_status.as_u16()),
            entry,
        };
    }

    // Phase 2: content confirmation.
    let prefix = match client.get_prefix(&entry.url, BODY_PROBE_LIMIT).await {
        Ok(prefix) => prefix,
        Err(e) => {
            return ValidationOutcome::Rejected {
                reason: RejectReason::network(ProbePhase::Get, &e),
                entry,
            };
        }
    };
    if prefix.status != StatusCode::OK {
        return ValidationOutcome::Rejected {
            reason: RejectReason::status(ProbePhase::Get, prefix.status.as_u16()),
            entry,
        };
    }
    if let Some(issue) = content_issue(&prefix.bytes) {
        return ValidationOutcome::Rejected {
            reason: RejectReason::content(issue),
            entry,
        };
    }

    entry.url = prefix.final_url;
    ValidationOutcome::Accepted(entry)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_content_issue_empty_body() {
        assert_eq!(content_issue(b""), Some(ContentIssue::EmptyBody));
    }

    #[test]
    fn test_content_issue_html_marker_lowercase() {
        assert_eq!(
            content_issue(b"<!doctype html><html>..."),
            Some(ContentIssue::HtmlPlaceholder)
        );
    }

    #[test]
    fn test_content_issue_html_marker_uppercase() {
        assert_eq!(
            content_issue(b"<!DOCTYPE HTML PUBLIC ..."),
            Some(ContentIssue::HtmlPlaceholder)
        );
    }

    #[test]
    fn test_content_issue_html_marker_mixed_case() {
        assert_eq!(
            content_issue(b"<!DocType Html>"),
            Some(ContentIssue::HtmlPlaceholder)
        );
    }

    #[test]
    fn test_content_issue_binary_data_accepted() {
        let data = [0x47u8, 0x40, 0x11, 0x10, 0x00]; // MPEG-TS sync byte and friends
        assert_eq!(content_issue(&data), None);
    }

    #[test]
    fn test_content_issue_marker_not_at_start_accepted() {
        // Only a *prefix* match disqualifies the body
        assert_eq!(content_issue(b"data <!doctype html"), None);
    }

    #[test]
    fn test_content_issue_truncated_marker_accepted() {
        // Shorter than the marker and not empty: not a placeholder
        assert_eq!(content_issue(b"<!doc"), None);
    }

    #[test]
    fn test_validation_outcome_helpers() {
        let entry = PlaylistEntry::new(0, "News", "CNN", "http://a.example/cnn");
        let accepted = ValidationOutcome::Accepted(entry.clone());
        assert!(accepted.is_accepted());
        assert_eq!(accepted.into_accepted(), Some(entry.clone()));

        let rejected = ValidationOutcome::Rejected {
            entry,
            reason: RejectReason::status(ProbePhase::Get, 404),
        };
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.into_accepted(), None);
    }
}
