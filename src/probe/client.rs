//! HTTP client wrapper for liveness probes and feed fetching.
//!
//! A single client (and its connection pool) is shared by all workers for
//! the whole run; `reqwest::Client` is internally reference-counted and
//! safe for concurrent use, so cloning this wrapper is cheap.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tracing::instrument;

/// Fixed per-request timeout for probe checks, in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 8;

/// Per-request timeout for feed downloads, in seconds.
pub const FEED_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with every request.
///
/// Many IPTV servers only answer clients that look like a mobile player;
/// this matches what the common Android players send.
pub const USER_AGENT: &str = "okhttp/5.2.0";

/// Status line and body prefix returned by a full content check.
#[derive(Debug, Clone)]
pub struct BodyPrefix {
    /// Final HTTP status after following redirects.
    pub status: StatusCode,
    /// Final URL after following redirects (the canonical URL).
    pub final_url: String,
    /// First bytes of the response body, at most the requested limit.
    pub bytes: Vec<u8>,
}

/// HTTP client for probing stream URLs and downloading feeds.
///
/// Redirects are followed on every request (reqwest's default limited
/// policy) and TLS certificate validation is disabled: playlist hosts
/// routinely serve self-signed or expired certificates, and a stream
/// behind a bad certificate is still a live stream.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with the default probe timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
    }

    /// Creates a client with an explicit per-request timeout.
    ///
    /// The timeout applies independently to each request the client
    /// issues, including the streamed read of a response body.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Issues a no-body request and returns the final status.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest::Error` on any network-level
    /// failure (timeout, connect, TLS, DNS, invalid URL).
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn head_status(&self, url: &str) -> Result<StatusCode, reqwest::Error> {
        let response = self.client.head(url).send().await?;
        Ok(response.status())
    }

    /// Issues a full request and reads at most `limit` bytes of the body.
    ///
    /// The response body is streamed and reading stops as soon as `limit`
    /// bytes have arrived, so probing a multi-gigabyte stream costs one
    /// kilobyte of transfer. The returned [`BodyPrefix`] carries the final
    /// post-redirect URL, which becomes the canonical URL on acceptance.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest::Error` on any network-level
    /// failure, including failures while streaming the body.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn get_prefix(&self, url: &str, limit: usize) -> Result<BodyPrefix, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let final_url = response.url().to_string();

        let mut bytes = Vec::with_capacity(limit.min(4096));
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            bytes.extend_from_slice(&chunk);
            if bytes.len() >= limit {
                bytes.truncate(limit);
                break;
            }
        }

        Ok(BodyPrefix {
            status,
            final_url,
            bytes,
        })
    }

    /// Downloads a feed document as text.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest::Error` on any network-level
    /// failure or if the body cannot be read.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub async fn fetch_text(&self, url: &str) -> Result<(StatusCode, String), reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}
