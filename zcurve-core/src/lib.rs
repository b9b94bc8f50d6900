//! Z-curve Core Library
//!
//! FASTA loading, cumulative base composition, the Z-curve coordinate
//! transform, GC content, and the rendering seam used by the front ends.

pub mod types;
pub mod error;
pub mod io;
pub mod transform;
pub mod composition;
pub mod gateway;
pub mod pipeline;

// Re-export commonly used types and functions
pub use types::{Base, CoordinateSeries, FrequencyVector, LoadedSequence, PlotFormat, Sequence, TransformMatrix};
pub use error::{ErrorKind, Result, ZcurveError};
pub use io::{derive_identifier, load_fasta, load_fasta_file, validate_definitions_path, validate_output_dir};
pub use transform::{cumulative_frequencies, zcurve_coordinates};
pub use composition::{gc_percent, BaseCounts};
pub use gateway::{PlotRequest, RenderGateway};
pub use pipeline::{process_file, run_batch, BatchSummary, FailurePolicy, PlotOptions, SequenceReport};

/// Version information for the Z-curve core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
