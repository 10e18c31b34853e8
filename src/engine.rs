//! Batch scheduler driving concurrent liveness probes.
//!
//! The engine takes the (already shuffled) entry sequence, partitions it
//! into fixed-size batches, and probes each batch with a semaphore-bounded
//! worker pool. Batches are strictly sequential: the next batch never
//! starts before every probe in the current one has returned, which caps
//! peak concurrency and keeps progress reporting monotonic.
//!
//! # Concurrency Model
//!
//! - Each probe runs in its own Tokio task
//! - A semaphore permit is acquired before spawning each probe
//! - Permits are released automatically when probes complete (RAII)
//! - Fan-in awaits every task handle before the batch boundary
//!
//! No ordering is guaranteed *within* a batch; the writer restores total
//! order by parse index after all batches finish.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use crate::playlist::PlaylistEntry;
use crate::probe::{HttpClient, ValidationOutcome, probe_entry};

/// Minimum allowed worker-pool size.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed worker-pool size.
const MAX_CONCURRENCY: usize = 64;

/// Default worker-pool size if not specified.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default number of entries per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Error type for validation engine construction and scheduling.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Invalid batch size provided.
    #[error("invalid batch size {value}: must be at least 1")]
    InvalidBatchSize {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// Aggregate counts from a validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationStats {
    checked: usize,
    valid: usize,
}

impl ValidationStats {
    /// Returns the number of entries probed.
    #[must_use]
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// Returns the number of entries that passed validation.
    #[must_use]
    pub fn valid(&self) -> usize {
        self.valid
    }

    /// Returns the number of entries that were dropped.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.checked - self.valid
    }
}

/// Result of a validation run: surviving entries plus aggregate counts.
///
/// The `valid` collection reflects shuffle and completion order, not
/// document order; the writer re-imposes order by index.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Entries that passed the liveness probe, with canonical URLs.
    pub valid: Vec<PlaylistEntry>,
    /// Aggregate counts for the run.
    pub stats: ValidationStats,
}

/// Shuffles the working list into a uniformly random permutation.
///
/// Probes target many different remote hosts; walking the playlist in feed
/// order would burst requests at one host at a time and trip rate limits.
/// Only positions in the working list change; the stored parse index is
/// untouched, so the writer can restore document order later.
pub fn shuffle_entries(entries: &mut [PlaylistEntry]) {
    entries.shuffle(&mut rand::thread_rng());
}

/// Batch scheduler for concurrent liveness probing.
///
/// Concurrency is intentionally capped at the worker-pool size regardless
/// of playlist size, bounding the outbound request rate and the memory
/// footprint. A batch with zero accepted entries simply contributes
/// nothing; no batch boundary has special error semantics.
#[derive(Debug)]
pub struct ValidationEngine {
    /// Semaphore for worker-pool concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured worker-pool size.
    concurrency: usize,
    /// Entries per batch.
    batch_size: usize,
}

impl ValidationEngine {
    /// Creates a new validation engine.
    ///
    /// # Arguments
    ///
    /// * `concurrency` - Maximum in-flight probes (1-64)
    /// * `batch_size` - Entries per batch (at least 1)
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] or
    /// [`EngineError::InvalidBatchSize`] if a value is out of range.
    pub fn new(concurrency: usize, batch_size: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }
        if batch_size == 0 {
            return Err(EngineError::InvalidBatchSize { value: batch_size });
        }

        debug!(concurrency, batch_size, "creating validation engine");

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
            batch_size,
        })
    }

    /// Returns the configured worker-pool size.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns the configured batch size.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Probes every entry and collects the survivors.
    ///
    /// Entries should already be shuffled (see [`shuffle_entries`]); this
    /// method preserves the order it is given when forming batches. For
    /// each batch it fans out one probe task per entry, gated by the
    /// worker-pool semaphore, then awaits every task before advancing.
    /// After each batch one progress line is logged: integer percent of
    /// total, valid so far, checked so far.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SemaphoreClosed`] if the semaphore is closed.
    ///
    /// Note: individual probe failures never surface here. Rejected
    /// entries are logged with their reason and dropped; a panicked probe
    /// task is logged and counted as checked but not valid.
    #[instrument(skip(self, client, entries), fields(total = entries.len()))]
    pub async fn validate(
        &self,
        client: &HttpClient,
        entries: Vec<PlaylistEntry>,
    ) -> Result<ValidationReport, EngineError> {
        let total = entries.len();
        if total == 0 {
            info!("nothing to validate");
            return Ok(ValidationReport::default());
        }

        info!(
            total,
            concurrency = self.concurrency,
            batch_size = self.batch_size,
            "starting validation"
        );

        let mut valid = Vec::new();
        let mut checked = 0usize;
        let mut iter = entries.into_iter();

        loop {
            let batch: Vec<PlaylistEntry> = iter.by_ref().take(self.batch_size).collect();
            if batch.is_empty() {
                break;
            }

            // Fan-out: one task per entry, gated by the pool semaphore.
            let mut handles = Vec::with_capacity(batch.len());
            for entry in batch {
                let permit = self
                    .semaphore
                    .clone()
                    .acquire_owned()
                    .await
                    .map_err(|_| EngineError::SemaphoreClosed)?;

                let client = client.clone();
                handles.push(tokio::spawn(async move {
                    // Permit is dropped when this block exits (RAII)
                    let _permit = permit;
                    probe_entry(&client, entry).await
                }));
            }

            // Fan-in: the batch boundary. Nothing from the next batch
            // starts until every probe here has returned.
            for handle in handles {
                checked += 1;
                match handle.await {
                    Ok(ValidationOutcome::Accepted(entry)) => {
                        debug!(index = entry.index, url = %entry.url, "stream accepted");
                        valid.push(entry);
                    }
                    Ok(ValidationOutcome::Rejected { entry, reason }) => {
                        debug!(index = entry.index, url = %entry.url, %reason, "stream rejected");
                    }
                    Err(e) => {
                        warn!(error = %e, "probe task panicked");
                    }
                }
            }

            let percent = checked * 100 / total;
            info!(percent, valid = valid.len(), checked, total, "progress");
        }

        let stats = ValidationStats {
            checked,
            valid: valid.len(),
        };
        info!(
            checked = stats.checked(),
            valid = stats.valid(),
            rejected = stats.rejected(),
            "validation complete"
        );

        Ok(ValidationReport { valid, stats })
    }
}
