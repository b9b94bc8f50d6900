//! Aggregate base composition

use crate::error::{Result, ZcurveError};
use crate::types::{Base, Sequence};

/// Absolute per-base counts of a sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseCounts {
    pub a: u64,
    pub c: u64,
    pub g: u64,
    pub t: u64,
}

impl BaseCounts {
    pub fn of(sequence: &Sequence) -> Self {
        let mut counts = Self::default();
        for base in sequence.bases() {
            match base {
                Base::A => counts.a += 1,
                Base::C => counts.c += 1,
                Base::G => counts.g += 1,
                Base::T => counts.t += 1,
            }
        }
        counts
    }

    pub fn strong(&self) -> u64 {
        self.g + self.c
    }

    pub fn total(&self) -> u64 {
        self.a + self.c + self.g + self.t
    }
}

/// GC content in percent. An empty sequence has no defined GC content and is
/// reported as [`ZcurveError::EmptySequence`].
pub fn gc_percent(sequence: &Sequence) -> Result<f64> {
    let counts = BaseCounts::of(sequence);
    if counts.total() == 0 {
        return Err(ZcurveError::empty("sequence"));
    }
    Ok(counts.strong() as f64 * 100.0 / counts.total() as f64)
}
