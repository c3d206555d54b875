//! shaseek Library
//!
//! Brute-force SHA-256 preimage search over fixed-width decimal keyspaces.
//!
//! # Overview
//!
//! Given a target digest and a candidate width, shaseek hashes every digit
//! string of that width in increasing order, in parallel batches, until one
//! hashes to the target or the keyspace is exhausted.
//!
//! # Features
//!
//! - **Self-contained digest engine**: incremental SHA-256 from `shaseek-core`
//! - **Batched workers**: candidates are generated in batches and hashed on a
//!   dedicated thread pool
//! - **Deterministic result**: the first match in enumeration order wins,
//!   independent of batch size and worker count
//! - **Pollable progress**: checked count and cursor readable mid-run
//!
//! # Example
//!
//! ```rust
//! use shaseek::digest::digest;
//! use shaseek::search::{search, SearchOutcome, SearchTask};
//!
//! let target = digest(b"4821");
//! let outcome = search(SearchTask::new(target, 4)).unwrap();
//!
//! match outcome {
//!     SearchOutcome::Found(m) => assert_eq!(m.candidate, "4821"),
//!     SearchOutcome::Exhausted { .. } => unreachable!(),
//! }
//! ```

// Re-export the digest engine
pub use shaseek_core as digest;

pub mod config;
pub mod error;
pub mod search;

// Convenience re-exports
pub use config::{parse_digest_hex, SearchConfig};
pub use error::SearchError;
pub use search::{SearchOutcome, SearchTask, Searcher};
