//! Incremental SHA-256 state
//!
//! [`Sha256`] buffers at most one partial block. Whole blocks supplied by
//! the caller are compressed straight out of the input slice, so feeding
//! data in multiples of 64 bytes never copies.

use crate::params::*;
use crate::primitives::compress;

/// A 32-byte SHA-256 digest
pub type Digest = [u8; DIGEST_SIZE];

/// Offset in the final block where the bit-length field starts
const LENGTH_OFFSET: usize = BLOCK_SIZE - LENGTH_FIELD_SIZE;

/// Streaming SHA-256 hasher
///
/// Created open by [`Sha256::new`], fed by any number of
/// [`update`](Sha256::update) calls and closed exactly once by
/// [`finalize`](Sha256::finalize), which consumes the state. Use
/// [`finalize_reset`](Sha256::finalize_reset) to close and reopen the same
/// value in a hot loop.
///
/// The total input must stay below [`MAX_INPUT_BYTES`]: past that the bit
/// count no longer fits the 64-bit length field. Debug builds assert on it;
/// release builds wrap the counter and the resulting digest is meaningless.
#[derive(Clone, Debug)]
pub struct Sha256 {
    /// Running hash words
    state: [u32; STATE_WORDS],
    /// Bytes not yet folded into `state`
    block: [u8; BLOCK_SIZE],
    /// Valid bytes in `block` (always < BLOCK_SIZE between calls)
    buffered: usize,
    /// Total bytes written since the last reset
    length: u64,
}

impl Sha256 {
    /// Create an open hasher with the standard initial state
    pub fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            block: [0u8; BLOCK_SIZE],
            buffered: 0,
            length: 0,
        }
    }

    /// Return to the freshly initialized state
    pub fn reset(&mut self) {
        self.state = INITIAL_STATE;
        self.block = [0u8; BLOCK_SIZE];
        self.buffered = 0;
        self.length = 0;
    }

    /// Total number of bytes written so far
    pub fn len(&self) -> u64 {
        self.length
    }

    /// True when nothing has been written since the last reset
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Append `data` to the message
    ///
    /// Empty slices are accepted and change nothing.
    pub fn update(&mut self, data: &[u8]) {
        self.length = self.length.wrapping_add(data.len() as u64);
        debug_assert!(
            self.length <= MAX_INPUT_BYTES,
            "SHA-256 input exceeds the 64-bit length field"
        );

        let mut input = data;
        while !input.is_empty() {
            if self.buffered == 0 {
                // Fast path: compress whole blocks straight from the caller's buffer
                while let Some((block, rest)) = input.split_first_chunk::<BLOCK_SIZE>() {
                    compress(&mut self.state, block);
                    input = rest;
                }
                if input.is_empty() {
                    break;
                }
            }

            let take = input.len().min(BLOCK_SIZE - self.buffered);
            self.block[self.buffered..self.buffered + take].copy_from_slice(&input[..take]);
            self.buffered += take;
            input = &input[take..];

            if self.buffered == BLOCK_SIZE {
                compress(&mut self.state, &self.block);
                self.buffered = 0;
            }
        }
    }

    /// Pad, append the bit length and produce the digest
    pub fn finalize(mut self) -> Digest {
        self.finish()
    }

    /// Produce the digest and reset so the hasher can be reused
    pub fn finalize_reset(&mut self) -> Digest {
        let digest = self.finish();
        self.reset();
        digest
    }

    fn finish(&mut self) -> Digest {
        let bit_length = self.length.wrapping_mul(8);

        // Mandatory terminator bit
        self.block[self.buffered] = 0x80;
        self.buffered += 1;

        // No room left for the length field: flush a zero-padded block
        if self.buffered > LENGTH_OFFSET {
            self.block[self.buffered..].fill(0);
            compress(&mut self.state, &self.block);
            self.buffered = 0;
        }

        self.block[self.buffered..LENGTH_OFFSET].fill(0);
        self.block[LENGTH_OFFSET..].copy_from_slice(&bit_length.to_be_bytes());
        compress(&mut self.state, &self.block);
        self.buffered = 0;

        let mut out = [0u8; DIGEST_SIZE];
        for (bytes, word) in out.chunks_exact_mut(4).zip(self.state.iter()) {
            bytes.copy_from_slice(&word.to_be_bytes());
        }
        out
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl std::io::Write for Sha256 {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Convenience function for single-shot hashing
///
/// Identical to `new` + one `update` + `finalize`. Intended for callers that
/// hold the whole message in memory, such as one search candidate.
#[inline]
pub fn digest(input: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hasher.finalize()
}
