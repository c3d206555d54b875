//! Brute-force preimage search over decimal candidates

mod candidate;
mod engine;
mod progress;

pub use candidate::{format_candidate, keyspace_size, CandidateCounter, Step, MAX_WIDTH};
pub use engine::{
    search, Match, MatchSlot, SearchOutcome, SearchTask, Searcher, DEFAULT_BATCH_SIZE,
};
pub use progress::{ProgressSnapshot, SearchProgress};
