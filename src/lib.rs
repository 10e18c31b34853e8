//! IPTV Checker Core Library
//!
//! This library validates streaming-channel playlists aggregated from
//! multiple remote feeds: it probes every candidate stream URL and emits a
//! cleaned playlist containing only live entries, in the original feed
//! order.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Immutable run configuration (feed mapping)
//! - [`fetch`] - Feed aggregation into one merged document
//! - [`playlist`] - Parsing and order-restoring serialization
//! - [`probe`] - Two-phase liveness probing of stream URLs
//! - [`engine`] - Shuffling and batched concurrent scheduling
//!
//! The pipeline is: merged document → parser → shuffle → batch scheduler
//! (driving many probes under a bounded worker pool) → order-restoring
//! writer → cleaned playlist.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod engine;
pub mod fetch;
pub mod playlist;
pub mod probe;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use engine::{
    DEFAULT_BATCH_SIZE, DEFAULT_CONCURRENCY, EngineError, ValidationEngine, ValidationReport,
    ValidationStats, shuffle_entries,
};
pub use fetch::{AggregateError, AggregateSummary, aggregate_feeds};
pub use playlist::{PlaylistEntry, parse_playlist, render_playlist, write_playlist};
pub use probe::{HttpClient, RejectReason, ValidationOutcome, probe_entry};
