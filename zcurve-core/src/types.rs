use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ZcurveError};

/// Nucleotide in the fixed column order of the transform: a, g, c, t.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    A,
    G,
    C,
    T,
}

impl Base {
    pub const ALL: [Base; 4] = [Base::A, Base::G, Base::C, Base::T];

    /// Accepts upper or lower case; anything else is not a base.
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            b'a' | b'A' => Some(Base::A),
            b'g' | b'G' => Some(Base::G),
            b'c' | b'C' => Some(Base::C),
            b't' | b'T' => Some(Base::T),
            _ => None,
        }
    }

    /// Column of this base in a [`FrequencyVector`] and the transform matrix.
    pub fn index(self) -> usize {
        match self {
            Base::A => 0,
            Base::G => 1,
            Base::C => 2,
            Base::T => 3,
        }
    }

    pub fn is_strong(self) -> bool {
        matches!(self, Base::G | Base::C)
    }
}

/// A validated nucleotide sequence, lower-cased, over {a, c, g, t}.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    residues: String,
}

impl Sequence {
    /// Validate and normalize free text. Whitespace is not stripped here.
    pub fn parse(text: &str) -> Result<Self> {
        let mut residues = String::with_capacity(text.len());
        for ch in text.chars() {
            match u8::try_from(ch).ok().and_then(Base::from_ascii) {
                Some(_) => residues.push(ch.to_ascii_lowercase()),
                None => {
                    return Err(ZcurveError::InvalidNucleotide {
                        source_name: "sequence".to_string(),
                        base: ch,
                        line: 1,
                    })
                }
            }
        }
        Ok(Self { residues })
    }

    /// Caller guarantees `residues` is lowercase acgt only.
    pub(crate) fn from_validated(residues: String) -> Self {
        debug_assert!(residues.bytes().all(|b| matches!(b, b'a' | b'c' | b'g' | b't')));
        Self { residues }
    }

    pub fn as_str(&self) -> &str {
        &self.residues
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.residues.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn bases(&self) -> impl Iterator<Item = Base> + '_ {
        // Every byte was validated on construction
        self.residues.bytes().filter_map(Base::from_ascii)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.residues)
    }
}

/// Output of the sequence loader.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSequence {
    pub identifier: String,
    pub sequence: Sequence,
    /// Header lines after the first one that were skipped while concatenating.
    pub skipped_headers: usize,
}

/// Cumulative relative frequency per base, in column order a, g, c, t.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrequencyVector {
    values: [f64; 4],
}

impl FrequencyVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, base: Base, step: f64) {
        self.values[base.index()] += step;
    }

    pub fn get(&self, base: Base) -> f64 {
        self.values[base.index()]
    }

    pub fn values(&self) -> [f64; 4] {
        self.values
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Fixed 3x4 projection from base-frequency space to plot space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix {
    rows: [[f64; 4]; 3],
}

impl TransformMatrix {
    pub const UNSCALED: [[f64; 4]; 3] = [
        [1.0, 1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0, 1.0],
    ];

    /// The Z-curve matrix: every entry scaled by sqrt(3)/4 once, up front.
    pub fn zcurve() -> Self {
        let sqrt3 = 3f64.sqrt();
        let mut rows = Self::UNSCALED;
        for row in rows.iter_mut() {
            for entry in row.iter_mut() {
                *entry = *entry * sqrt3 / 4.0;
            }
        }
        Self { rows }
    }

    pub fn from_rows(rows: [[f64; 4]; 3]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[[f64; 4]; 3] {
        &self.rows
    }

    /// Apply the matrix to one frequency vector, summing terms left to right.
    pub fn apply(&self, freq: &FrequencyVector) -> [f64; 3] {
        let v = freq.values();
        let mut out = [0.0; 3];
        for (axis, row) in self.rows.iter().enumerate() {
            out[axis] = row.iter().zip(v.iter()).map(|(m, f)| f * m).sum();
        }
        out
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::zcurve()
    }
}

/// Axis-aligned bounds of a coordinate series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

/// Three parallel coordinate sequences, one triple per sequence position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoordinateSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl CoordinateSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: [f64; 3]) {
        self.x.push(point[0]);
        self.y.push(point[1]);
        self.z.push(point[2]);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<[f64; 3]> {
        Some([*self.x.get(index)?, *self.y.get(index)?, *self.z.get(index)?])
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| [x, y, z])
    }

    pub fn bounds(&self) -> Option<Bounds3> {
        let mut points = self.points();
        let first = points.next()?;
        let mut bounds = Bounds3 { min: first, max: first };
        for p in points {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(p[axis]);
                bounds.max[axis] = bounds.max[axis].max(p[axis]);
            }
        }
        Some(bounds)
    }

    /// Evenly strided indices, at most `max_points` of them, always keeping the
    /// first and last position.
    pub fn sample_indices(&self, max_points: usize) -> Vec<usize> {
        let n = self.len();
        if n == 0 || max_points == 0 {
            return Vec::new();
        }
        if n <= max_points {
            return (0..n).collect();
        }
        if max_points == 1 {
            return vec![n - 1];
        }
        let stride = (n - 1).div_ceil(max_points - 1);
        let mut indices: Vec<usize> = (0..n).step_by(stride).collect();
        if indices.last() != Some(&(n - 1)) {
            indices.push(n - 1);
        }
        indices
    }
}

/// Output image format of a plot artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotFormat {
    Png,
    Jpeg,
    Svg,
    Pdf,
}

impl PlotFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PlotFormat::Png => "png",
            PlotFormat::Jpeg => "jpeg",
            PlotFormat::Svg => "svg",
            PlotFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for PlotFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Ok(PlotFormat::Png),
            "jpeg" | "jpg" => Ok(PlotFormat::Jpeg),
            "svg" => Ok(PlotFormat::Svg),
            "pdf" => Ok(PlotFormat::Pdf),
            other => Err(format!(
                "Unknown plot format: {}. Available formats: png, jpeg, svg, pdf",
                other
            )),
        }
    }
}

impl fmt::Display for PlotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_order_matches_columns() {
        let order: Vec<usize> = Base::ALL.iter().map(|b| b.index()).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(Base::from_ascii(b'G'), Some(Base::G));
        assert_eq!(Base::from_ascii(b'n'), None);
    }

    #[test]
    fn test_sequence_parse_normalizes_case() {
        let seq = Sequence::parse("AcGt").unwrap();
        assert_eq!(seq.as_str(), "acgt");
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn test_sequence_parse_rejects_ambiguity_codes() {
        let err = Sequence::parse("acgn").unwrap_err();
        assert!(matches!(err, ZcurveError::InvalidNucleotide { base: 'n', .. }));
    }

    #[test]
    fn test_matrix_scaling() {
        let m = TransformMatrix::zcurve();
        let s = 3f64.sqrt() / 4.0;
        assert_eq!(m.rows()[0], [s, s, -s, -s]);
        assert_eq!(m.rows()[2], [s, -s, -s, s]);
    }

    #[test]
    fn test_sample_indices_keeps_endpoints() {
        let mut series = CoordinateSeries::default();
        for i in 0..101 {
            series.push([i as f64, 0.0, 0.0]);
        }
        let idx = series.sample_indices(10);
        assert_eq!(idx.first(), Some(&0));
        assert_eq!(idx.last(), Some(&100));
        assert!(idx.len() <= 11);
        assert_eq!(series.sample_indices(1000).len(), 101);
        assert!(CoordinateSeries::default().sample_indices(10).is_empty());
    }

    #[test]
    fn test_bounds() {
        let mut series = CoordinateSeries::default();
        assert!(series.bounds().is_none());
        series.push([1.0, -2.0, 0.5]);
        series.push([-1.0, 3.0, 0.0]);
        let b = series.bounds().unwrap();
        assert_eq!(b.min, [-1.0, -2.0, 0.0]);
        assert_eq!(b.max, [1.0, 3.0, 0.5]);
    }

    #[test]
    fn test_plot_format_parsing() {
        assert_eq!("PNG".parse::<PlotFormat>(), Ok(PlotFormat::Png));
        assert_eq!("jpg".parse::<PlotFormat>(), Ok(PlotFormat::Jpeg));
        assert_eq!(".svg".parse::<PlotFormat>(), Ok(PlotFormat::Svg));
        assert!("tiff".parse::<PlotFormat>().is_err());
    }
}
