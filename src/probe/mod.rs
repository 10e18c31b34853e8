//! Liveness probing for stream URLs.
//!
//! This module decides whether a candidate stream URL is actually
//! reachable and serving real content, using a two-phase network check:
//!
//! - a lightweight HEAD request that rejects dead URLs cheaply (tolerating
//!   405 from servers that refuse HEAD), then
//! - a streamed GET that must return 200 with a non-empty first kilobyte
//!   that is not an HTML placeholder page.
//!
//! Accepted entries carry the canonical URL reached after following the
//! GET's redirects. Rejections carry a [`RejectReason`] from a closed set;
//! no probe failure ever propagates as an error or triggers a retry.

mod client;
mod error;
mod prober;

pub use client::{
    BodyPrefix, FEED_TIMEOUT_SECS, HttpClient, PROBE_TIMEOUT_SECS, USER_AGENT,
};
pub use error::{ContentIssue, ProbePhase, RejectReason};
pub use prober::{BODY_PROBE_LIMIT, ValidationOutcome, probe_entry};
