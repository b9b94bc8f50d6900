//! Cumulative composition and the Z-curve coordinate transform
//!
//! A single left-to-right pass over the sequence. After position `i` each base
//! frequency equals its count in `0..=i` divided by `N + 1` (not `N`), so the
//! frequencies at the last position sum to `N / (N + 1)`. Downstream plots were
//! produced with that denominator and the exact values are kept.

use crate::types::{CoordinateSeries, FrequencyVector, Sequence, TransformMatrix};

/// Running frequency vectors, one per sequence position.
pub struct CumulativeFrequencies<'a> {
    bases: std::slice::Iter<'a, u8>,
    step: f64,
    current: FrequencyVector,
}

impl Iterator for CumulativeFrequencies<'_> {
    type Item = FrequencyVector;

    fn next(&mut self) -> Option<Self::Item> {
        let base = self.bases.by_ref().find_map(|&b| crate::types::Base::from_ascii(b))?;
        self.current.increment(base, self.step);
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.bases.size_hint()
    }
}

pub fn cumulative_frequencies(sequence: &Sequence) -> CumulativeFrequencies<'_> {
    CumulativeFrequencies {
        bases: sequence.as_bytes().iter(),
        step: 1.0 / (sequence.len() as f64 + 1.0),
        current: FrequencyVector::new(),
    }
}

/// Project every cumulative frequency vector through `matrix`. An empty
/// sequence yields an empty series.
pub fn zcurve_coordinates(sequence: &Sequence, matrix: &TransformMatrix) -> CoordinateSeries {
    let mut series = CoordinateSeries::with_capacity(sequence.len());
    for freq in cumulative_frequencies(sequence) {
        series.push(matrix.apply(&freq));
    }
    series
}
