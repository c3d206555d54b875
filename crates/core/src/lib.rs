//! # shaseek core: incremental SHA-256
//!
//! A self-contained SHA-256 (FIPS 180-4) digest engine built for
//! brute-force preimage search, where every unit of work is one short
//! message hashed from scratch.
//!
//! ## Features
//!
//! - **Streaming**: feed input in any number of chunks of any size
//! - **Zero-copy blocks**: whole 64-byte blocks are compressed straight
//!   from the caller's slice
//! - **Single-shot**: [`digest`] for messages already contiguous in memory
//! - **Owned output**: digests are returned as `[u8; 32]`, never written
//!   through a caller pointer
//!
//! ## Example
//!
//! ```rust
//! use shaseek_core::{Sha256, digest};
//!
//! // Single-shot hashing
//! let one = digest(b"hello world");
//!
//! // Same message, streamed in pieces
//! let mut hasher = Sha256::new();
//! hasher.update(b"hello");
//! hasher.update(b" ");
//! hasher.update(b"world");
//! assert_eq!(hasher.finalize(), one);
//! ```
//!
//! ## no_std Support
//!
//! Disable default features to drop the `std::io::Write` adapter:
//!
//! ```toml
//! [dependencies]
//! shaseek-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod params;
mod primitives;
mod sha256;

pub use params::*;
pub use sha256::{Digest, Sha256, digest};
