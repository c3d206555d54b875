//! Batched parallel search engine
//!
//! Each run repeats the same cycle until a match or the end of the keyspace:
//!
//! 1. Generate up to `batch_size` candidates into one contiguous buffer
//! 2. Hash every candidate on the worker pool, one private hasher per digest
//! 3. Workers that see the target publish their batch-local index to a [`MatchSlot`]
//! 4. Once the whole batch is done, check the slot
//!
//! A batch is never started before the previous one has been fully scanned,
//! so the first match in enumeration order is always the one reported.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use shaseek_core::{digest, Digest};

use super::candidate::{CandidateCounter, Step};
use super::progress::SearchProgress;
use crate::error::{Result, SearchError};

/// Candidates generated and dispatched together when not configured
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Sentinel for an empty [`MatchSlot`]
const UNSET: usize = usize::MAX;

/// Immutable configuration for one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTask {
    /// Digest the winning candidate must produce
    pub target: Digest,
    /// Digits per candidate
    pub width: usize,
    /// Candidates per batch
    pub batch_size: NonZeroUsize,
    /// Worker threads
    pub workers: NonZeroUsize,
    /// First candidate to try; all zeros when `None`
    pub start: Option<String>,
}

impl SearchTask {
    /// Task over the full keyspace of `width` digits with default parallelism
    pub fn new(target: Digest, width: usize) -> Self {
        Self {
            target,
            width,
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
            workers: NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN),
            start: None,
        }
    }

    pub fn with_batch_size(mut self, batch_size: NonZeroUsize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    /// Start from `start` instead of all zeros; its length must equal `width`
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }
}

/// Write-once-wins slot for the batch-local index of a match
///
/// Concurrent publishers never overwrite each other destructively: the slot
/// keeps the smallest index ever published, so the outcome is the first
/// match in enumeration order no matter how the workers are scheduled.
#[derive(Debug)]
pub struct MatchSlot(AtomicUsize);

impl MatchSlot {
    pub fn new() -> Self {
        Self(AtomicUsize::new(UNSET))
    }

    /// Offer `index` as a match; returns true if it is now the winner
    pub fn publish(&self, index: usize) -> bool {
        debug_assert_ne!(index, UNSET);
        self.0.fetch_min(index, Ordering::AcqRel) > index
    }

    /// Winning index, if any worker has published
    pub fn get(&self) -> Option<usize> {
        match self.0.load(Ordering::Acquire) {
            UNSET => None,
            index => Some(index),
        }
    }
}

impl Default for MatchSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// A candidate whose digest equals the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The preimage
    pub candidate: String,
    /// Its digest (equal to the target)
    pub digest: Digest,
    /// Position counted from the start candidate, starting at 0
    pub index: u64,
}

/// Terminal state of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A candidate hashed to the target
    Found(Match),
    /// Every candidate from the start to the end of the keyspace was checked
    Exhausted {
        /// Candidates checked, each exactly once
        checked: u64,
    },
}

impl SearchOutcome {
    pub fn found(&self) -> Option<&Match> {
        match self {
            SearchOutcome::Found(m) => Some(m),
            SearchOutcome::Exhausted { .. } => None,
        }
    }
}

/// Runs a [`SearchTask`] on its own worker pool
pub struct Searcher {
    task: SearchTask,
    start: CandidateCounter,
    progress: Arc<SearchProgress>,
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl Searcher {
    /// Validate the task and build the worker pool
    pub fn new(task: SearchTask) -> Result<Self> {
        let start = match &task.start {
            Some(start) => {
                let counter = CandidateCounter::from_start(start)?;
                if counter.width() != task.width {
                    return Err(SearchError::InvalidStart {
                        candidate: start.clone(),
                        reason: format!("expected {} digits", task.width),
                    });
                }
                counter
            }
            None => CandidateCounter::new(task.width)?,
        };

        #[cfg(feature = "parallel")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(task.workers.get())
            .thread_name(|i| format!("shaseek-worker-{i}"))
            .build()?;

        let progress = Arc::new(SearchProgress::new(task.width, start.value()));

        Ok(Self {
            task,
            start,
            progress,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn task(&self) -> &SearchTask {
        &self.task
    }

    /// Shared progress handle, readable while [`run`](Self::run) executes
    pub fn progress(&self) -> Arc<SearchProgress> {
        Arc::clone(&self.progress)
    }

    /// Search until a match is found or the keyspace runs out
    pub fn run(&self) -> SearchOutcome {
        let width = self.task.width;
        let batch_size = self.task.batch_size.get();

        info!(
            width,
            batch_size,
            workers = self.task.workers.get(),
            start = %self.start,
            remaining = self.start.remaining(),
            "starting search"
        );
        self.progress.reset(self.start.value());

        // A batch never holds more than what is left of the keyspace
        let remaining = usize::try_from(self.start.remaining()).unwrap_or(usize::MAX);
        let mut batch = Vec::with_capacity(batch_size.min(remaining).saturating_mul(width));
        let mut counter = self.start.clone();
        // The start candidate has not been emitted yet
        let mut pending = true;
        let mut exhausted = false;
        let mut base: u64 = 0;

        loop {
            batch.clear();
            let mut count = 0usize;
            while count < batch_size {
                if !pending && counter.advance() == Step::Exhausted {
                    exhausted = true;
                    break;
                }
                pending = false;
                batch.extend_from_slice(counter.as_bytes());
                count += 1;
            }

            if count > 0 {
                let hit = self.scan_batch(&batch);
                self.progress.record_batch(count as u64, counter.value());
                debug!(
                    batch = self.progress.batches(),
                    candidates = count,
                    cursor = %counter,
                    "batch scanned"
                );

                if let Some(i) = hit {
                    let candidate = &batch[i * width..(i + 1) * width];
                    let found = Match {
                        candidate: String::from_utf8_lossy(candidate).into_owned(),
                        digest: digest(candidate),
                        index: base + i as u64,
                    };
                    info!(
                        candidate = %found.candidate,
                        index = found.index,
                        "match found"
                    );
                    return SearchOutcome::Found(found);
                }
                base += count as u64;
            }

            if exhausted {
                info!(checked = base, "keyspace exhausted without a match");
                return SearchOutcome::Exhausted { checked: base };
            }
        }
    }

    /// Hash every candidate in `batch` on the pool; returns the first match
    #[cfg(feature = "parallel")]
    fn scan_batch(&self, batch: &[u8]) -> Option<usize> {
        let target = &self.task.target;
        let slot = MatchSlot::new();

        self.pool.install(|| {
            batch
                .par_chunks(self.task.width)
                .enumerate()
                .for_each(|(i, candidate)| {
                    if digest(candidate) == *target && slot.publish(i) {
                        tracing::trace!(index = i, "published match");
                    }
                });
        });

        slot.get()
    }

    /// Hash every candidate in `batch` in order (sequential fallback)
    #[cfg(not(feature = "parallel"))]
    fn scan_batch(&self, batch: &[u8]) -> Option<usize> {
        let target = &self.task.target;
        batch
            .chunks(self.task.width)
            .position(|candidate| digest(candidate) == *target)
    }
}

/// Convenience function for a one-off search
///
/// Builds a [`Searcher`] for `task` and runs it to completion.
pub fn search(task: SearchTask) -> Result<SearchOutcome> {
    Ok(Searcher::new(task)?.run())
}
