//! Raw SHA-256 block compression
//!
//! The compression function folds one 64-byte block into the running
//! 8-word hash state. Everything here operates on whole blocks; padding and
//! length encoding live in [`crate::sha256`].

use crate::params::{BLOCK_SIZE, ROUND_CONSTANTS, ROUNDS, STATE_WORDS};

/// Choose: each bit of `x` selects the corresponding bit of `y` or `z`
#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

/// Majority of the three input bits
#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

/// Σ0, applied to working variable `a`
#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

/// Σ1, applied to working variable `e`
#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

/// σ0, message schedule mixing of `w[t - 15]`
#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

/// σ1, message schedule mixing of `w[t - 2]`
#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Expand one block into the 64-word message schedule
///
/// The first 16 words are the block read as big-endian `u32`s; each later
/// word is `σ1(w[t-2]) + w[t-7] + σ0(w[t-15]) + w[t-16]` modulo 2^32.
#[inline(always)]
fn message_schedule(block: &[u8; BLOCK_SIZE]) -> [u32; ROUNDS] {
    let mut w = [0u32; ROUNDS];

    for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    for t in 16..ROUNDS {
        w[t] = small_sigma1(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma0(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }

    w
}

/// SHA-256 compression function
///
/// Runs the 64 rounds over `block` and adds the result into `state`
/// (each word modulo 2^32).
#[inline(always)]
pub(crate) fn compress(state: &mut [u32; STATE_WORDS], block: &[u8; BLOCK_SIZE]) {
    let w = message_schedule(block);

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for (k, wt) in ROUND_CONSTANTS.iter().zip(w.iter()) {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(*k)
            .wrapping_add(*wt);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (word, value) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *word = word.wrapping_add(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::INITIAL_STATE;

    /// "abc" padded into a single block by hand
    fn abc_block() -> [u8; BLOCK_SIZE] {
        let mut block = [0u8; BLOCK_SIZE];
        block[..3].copy_from_slice(b"abc");
        block[3] = 0x80;
        block[63] = 24;
        block
    }

    #[test]
    fn test_compress_single_block_abc() {
        let mut state = INITIAL_STATE;
        compress(&mut state, &abc_block());

        assert_eq!(
            state,
            [
                0xba7816bf, 0x8f01cfea, 0x414140de, 0x5dae2223, 0xb00361a3, 0x96177a9c, 0xb410ff61,
                0xf20015ad,
            ]
        );
    }

    #[test]
    fn test_compress_deterministic() {
        let block = [1u8; BLOCK_SIZE];

        let mut state1 = INITIAL_STATE;
        let mut state2 = INITIAL_STATE;
        compress(&mut state1, &block);
        compress(&mut state2, &block);

        assert_eq!(state1, state2);
        assert_ne!(state1, INITIAL_STATE);
    }

    #[test]
    fn test_message_schedule_loads_big_endian() {
        let w = message_schedule(&abc_block());

        assert_eq!(w[0], 0x61626380);
        assert_eq!(w[1..15], [0u32; 14]);
        assert_eq!(w[15], 0x00000018);
        // First derived word, from FIPS 180-2 appendix B.1
        assert_eq!(w[16], 0x61626380);
    }

    #[test]
    fn test_choose_and_majority() {
        assert_eq!(ch(0xffff0000, 0x12345678, 0x9abcdef0), 0x1234def0);
        assert_eq!(maj(0xff00ff00, 0x0ff00ff0, 0x00ff00ff), 0x0ff00ff0);
    }
}
