//! Rejection reasons for the liveness probe.
//!
//! Every way a probe can fail resolves to one [`RejectReason`]; nothing
//! from an individual probe propagates to the caller as an error. The
//! reason is kept for logging and tests, and collapses to plain exclusion
//! at the output boundary.

use std::fmt;

use thiserror::Error;

/// Which of the two probe checks produced an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePhase {
    /// The lightweight, no-body existence check.
    Head,
    /// The full content-confirmation check.
    Get,
}

impl fmt::Display for ProbePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head => write!(f, "HEAD"),
            Self::Get => write!(f, "GET"),
        }
    }
}

/// What was wrong with the response body prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentIssue {
    /// The body was empty.
    EmptyBody,
    /// The body starts with an HTML document marker; almost certainly a
    /// placeholder or error page rather than a stream.
    HtmlPlaceholder,
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBody => write!(f, "empty body"),
            Self::HtmlPlaceholder => write!(f, "HTML placeholder page"),
        }
    }
}

/// Why a probed entry was rejected (closed set).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// Network-level failure at any step (timeout, connection refused,
    /// TLS failure, DNS failure). Caught locally; never retried.
    #[error("network failure during {phase} check: {detail}")]
    TransientNetwork {
        /// The check during which the failure occurred.
        phase: ProbePhase,
        /// Rendered description of the underlying network error.
        detail: String,
    },

    /// The lightweight check returned an error status (other than the 405
    /// carve-out), or the full check returned a non-200 status.
    #[error("HTTP {status} on {phase} check")]
    RejectedStatus {
        /// The HTTP status code observed.
        status: u16,
        /// The check that returned the status.
        phase: ProbePhase,
    },

    /// The first kilobyte of the body disqualified the stream.
    #[error("invalid content: {issue}")]
    InvalidContent {
        /// What was wrong with the body prefix.
        issue: ContentIssue,
    },
}

impl RejectReason {
    /// Creates a transient-network rejection from a reqwest error.
    #[must_use]
    pub fn network(phase: ProbePhase, source: &reqwest::Error) -> Self {
        Self::TransientNetwork {
            phase,
            detail: source.to_string(),
        }
    }

    /// Creates a status rejection.
    #[must_use]
    pub fn status(phase: ProbePhase, status: u16) -> Self {
        Self::RejectedStatus { status, phase }
    }

    /// Creates an invalid-content rejection.
    #[must_use]
    pub fn content(issue: ContentIssue) -> Self {
        Self::InvalidContent { issue }
    }
}
