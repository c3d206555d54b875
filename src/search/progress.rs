//! Pollable search progress
//!
//! The engine updates these counters once per batch. Any thread holding
//! the `Arc` can read them while the search runs, which is how rate and
//! cursor reporting is layered on top of [`Searcher::run`](super::Searcher::run).

use std::sync::atomic::{AtomicU64, Ordering};

use super::candidate::format_candidate;

/// Live counters for one search run
#[derive(Debug)]
pub struct SearchProgress {
    width: usize,
    checked: AtomicU64,
    batches: AtomicU64,
    cursor: AtomicU64,
}

/// Point-in-time copy of [`SearchProgress`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Candidates whose digest has been compared
    pub checked: u64,
    /// Batches fully scanned
    pub batches: u64,
    /// Last candidate dispatched
    pub cursor: String,
}

impl SearchProgress {
    pub(crate) fn new(width: usize, start: u64) -> Self {
        Self {
            width,
            checked: AtomicU64::new(0),
            batches: AtomicU64::new(0),
            cursor: AtomicU64::new(start),
        }
    }

    pub(crate) fn reset(&self, start: u64) {
        self.checked.store(0, Ordering::Relaxed);
        self.batches.store(0, Ordering::Relaxed);
        self.cursor.store(start, Ordering::Relaxed);
    }

    pub(crate) fn record_batch(&self, candidates: u64, last: u64) {
        self.checked.fetch_add(candidates, Ordering::Relaxed);
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.cursor.store(last, Ordering::Relaxed);
    }

    /// Candidates checked so far
    pub fn checked(&self) -> u64 {
        self.checked.load(Ordering::Relaxed)
    }

    /// Batches completed so far
    pub fn batches(&self) -> u64 {
        self.batches.load(Ordering::Relaxed)
    }

    /// Last candidate dispatched (the start candidate before the first batch)
    pub fn cursor(&self) -> String {
        format_candidate(self.cursor.load(Ordering::Relaxed), self.width)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            checked: self.checked(),
            batches: self.batches(),
            cursor: self.cursor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_reset() {
        let progress = SearchProgress::new(4, 17);
        assert_eq!(progress.cursor(), "0017");
        assert_eq!(progress.checked(), 0);

        progress.record_batch(10, 26);
        progress.record_batch(10, 36);
        assert_eq!(
            progress.snapshot(),
            ProgressSnapshot {
                checked: 20,
                batches: 2,
                cursor: "0036".to_string(),
            }
        );

        progress.reset(0);
        assert_eq!(progress.checked(), 0);
        assert_eq!(progress.batches(), 0);
        assert_eq!(progress.cursor(), "0000");
    }
}
