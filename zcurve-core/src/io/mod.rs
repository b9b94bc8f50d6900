//! Input and output helpers for Z-curve processing
//!
//! Sequence loading lives in [`fasta`]; this module also hosts the path checks
//! the front ends run before any input is touched.

pub mod fasta;

pub use fasta::{derive_identifier, load_fasta, load_fasta_file, FastaLoader};

use std::path::{Path, PathBuf};

use crate::error::{Result, ZcurveError};

/// Output directories must exist beforehand; they are never created here.
pub fn validate_output_dir<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_dir() {
        Ok(path.to_path_buf())
    } else {
        Err(ZcurveError::invalid_path(path))
    }
}

/// Rendering definition files (plot styles) must exist and be regular files.
pub fn validate_definitions_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(ZcurveError::invalid_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_validate_output_dir() {
        let dir = tempdir().unwrap();
        assert_eq!(validate_output_dir(dir.path()).unwrap(), dir.path());

        let missing = dir.path().join("nope");
        let err = validate_output_dir(&missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
    }

    #[test]
    fn test_output_dir_rejects_files() {
        let file = NamedTempFile::new().unwrap();
        assert!(validate_output_dir(file.path()).is_err());
        assert!(validate_definitions_path(file.path()).is_ok());
    }
}
