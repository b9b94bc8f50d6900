//! Error taxonomy for Z-curve computation and plotting

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the core can report. Validation errors abort the input they
/// were raised for; nothing is retried.
#[derive(Debug, Error)]
pub enum ZcurveError {
    #[error("Input {source_name} is not a valid FASTA file: first line must start with '>'")]
    InvalidFormat { source_name: String },

    #[error("Input {source_name} contains an invalid nucleotide {base:?} at line {line}")]
    InvalidNucleotide {
        source_name: String,
        base: char,
        line: usize,
    },

    #[error("Path does not exist or has the wrong type: {}", path.display())]
    InvalidPath { path: PathBuf },

    #[error("Rendering failed: {message}")]
    RenderingFailure { message: String },

    #[error("Sequence {source_name} is empty")]
    EmptySequence { source_name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fieldless discriminant of [`ZcurveError`], handy for matching and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidFormat,
    InvalidNucleotide,
    InvalidPath,
    RenderingFailure,
    EmptySequence,
    Io,
}

impl ZcurveError {
    pub fn rendering<S: Into<String>>(message: S) -> Self {
        Self::RenderingFailure { message: message.into() }
    }

    pub fn invalid_path<P: Into<PathBuf>>(path: P) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    pub fn empty<S: Into<String>>(source_name: S) -> Self {
        Self::EmptySequence { source_name: source_name.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::InvalidNucleotide { .. } => ErrorKind::InvalidNucleotide,
            Self::InvalidPath { .. } => ErrorKind::InvalidPath,
            Self::RenderingFailure { .. } => ErrorKind::RenderingFailure,
            Self::EmptySequence { .. } => ErrorKind::EmptySequence,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, ZcurveError>;
