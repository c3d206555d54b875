//! Fixed-width decimal candidate enumeration
//!
//! Candidates are strings of `width` ASCII digits visited in increasing
//! numeric order. Moving past the all-`'9'` value is reported as
//! [`Step::Exhausted`]; the counter never wraps back to zero.

use std::fmt;

use crate::error::{Result, SearchError};

/// Widest candidate supported; keeps every index and the keyspace size in `u64`
pub const MAX_WIDTH: usize = 19;

/// Result of advancing a [`CandidateCounter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The counter moved to the next candidate
    Advanced,
    /// The counter was already at the last candidate and did not change
    Exhausted,
}

/// Decimal counter over fixed-width digit strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCounter {
    digits: Vec<u8>,
}

impl CandidateCounter {
    /// Counter positioned at the all-zeros candidate
    pub fn new(width: usize) -> Result<Self> {
        check_width(width)?;
        Ok(Self {
            digits: vec![b'0'; width],
        })
    }

    /// Counter positioned at `start`, which also fixes the width
    pub fn from_start(start: &str) -> Result<Self> {
        let invalid = |reason: &str| SearchError::InvalidStart {
            candidate: start.to_string(),
            reason: reason.to_string(),
        };

        if start.is_empty() || start.len() > MAX_WIDTH {
            let reason = format!("length must be between 1 and {MAX_WIDTH}");
            return Err(invalid(&reason));
        }
        if !start.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("only the digits 0-9 are allowed"));
        }

        Ok(Self {
            digits: start.as_bytes().to_vec(),
        })
    }

    /// Number of digits in every candidate
    pub fn width(&self) -> usize {
        self.digits.len()
    }

    /// The current candidate as ASCII bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.digits
    }

    /// Numeric value of the current candidate
    pub fn value(&self) -> u64 {
        self.digits
            .iter()
            .fold(0u64, |acc, d| acc * 10 + u64::from(d - b'0'))
    }

    /// Candidates from the current one to the end of the keyspace, inclusive
    pub fn remaining(&self) -> u64 {
        // Distance to the all-'9' candidate, plus the current one
        self.digits
            .iter()
            .fold(0u64, |acc, d| acc * 10 + u64::from(b'9' - d))
            + 1
    }

    /// Step to the next candidate
    ///
    /// The rightmost digit below `'9'` is incremented and every digit to
    /// its right resets to `'0'`, which is ordinary carry propagation done
    /// in one pass. With no such digit the carry would leave the leftmost
    /// position, so the counter stays put and reports exhaustion.
    pub fn advance(&mut self) -> Step {
        match self.digits.iter().rposition(|&d| d != b'9') {
            Some(pos) => {
                self.digits[pos] += 1;
                self.digits[pos + 1..].fill(b'0');
                Step::Advanced
            }
            None => Step::Exhausted,
        }
    }
}

impl fmt::Display for CandidateCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in &self.digits {
            write!(f, "{}", char::from(d))?;
        }
        Ok(())
    }
}

/// Total number of candidates of the given width
///
/// `None` when the count does not fit in `u64`, i.e. for `width > MAX_WIDTH`.
pub fn keyspace_size(width: usize) -> Option<u64> {
    u32::try_from(width)
        .ok()
        .and_then(|width| 10u64.checked_pow(width))
}

/// Render `value` as a zero-padded candidate of `width` digits
pub fn format_candidate(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}

fn check_width(width: usize) -> Result<()> {
    if (1..=MAX_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(SearchError::InvalidWidth(width))
    }
}
