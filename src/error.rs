//! Error types for search configuration
//!
//! Only setup can fail. Once a [`Searcher`](crate::search::Searcher) exists,
//! running it always ends in a [`SearchOutcome`](crate::search::SearchOutcome),
//! and an exhausted keyspace is one of those outcomes rather than an error.

use std::path::PathBuf;
use thiserror::Error;

use crate::search::MAX_WIDTH;

/// Result type for search setup
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised while building a search
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("candidate width must be between 1 and {max}, got {0}", max = MAX_WIDTH)]
    InvalidWidth(usize),

    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("worker count must be at least 1")]
    ZeroWorkers,

    #[error("target digest is not valid hex: {0}")]
    TargetHex(#[from] hex::FromHexError),

    #[error("target digest must be {expected} bytes, got {actual}")]
    TargetLength { expected: usize, actual: usize },

    #[error("start candidate {candidate:?} is invalid: {reason}")]
    InvalidStart { candidate: String, reason: String },

    #[cfg(feature = "parallel")]
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
