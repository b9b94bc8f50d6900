//! FASTA-like sequence loader
//!
//! Reads a header line followed by sequence lines and collapses the body into
//! one validated [`Sequence`]. Every line after the first that starts with `>`
//! is skipped rather than treated as a record separator, so a multi-record
//! file becomes one concatenated sequence. The count of skipped headers is
//! returned and logged so the collapse is never silent.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{Result, ZcurveError};
use crate::types::{Base, LoadedSequence, Sequence};

/// Loader for single-sequence FASTA inputs
pub struct FastaLoader;

impl FastaLoader {
    /// Load a FASTA file from disk. Files ending in `.gz` are decompressed.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<LoadedSequence> {
        let path = path.as_ref();
        let name = path.to_string_lossy();
        let file = File::open(path)?;

        if name.ends_with(".gz") {
            Self::load_reader(BufReader::new(GzDecoder::new(file)), &name)
        } else {
            Self::load_reader(BufReader::new(file), &name)
        }
    }

    /// Load from any buffered reader; `name` feeds the identifier and errors.
    pub fn load_reader<R: BufRead>(mut reader: R, name: &str) -> Result<LoadedSequence> {
        let mut line = Vec::new();

        // Format check happens before any of the body is scanned
        reader.read_until(b'\n', &mut line)?;
        if !line.starts_with(b">") {
            return Err(ZcurveError::InvalidFormat { source_name: name.to_string() });
        }

        let mut residues = String::new();
        let mut skipped_headers = 0usize;
        let mut line_number = 1usize;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            line_number += 1;

            if line.starts_with(b">") {
                skipped_headers += 1;
                continue;
            }

            let fragment = line.trim_ascii();
            if let Some(pos) = fragment.iter().position(|&b| Base::from_ascii(b).is_none()) {
                let base = String::from_utf8_lossy(&fragment[pos..])
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
                    .to_ascii_lowercase();
                return Err(ZcurveError::InvalidNucleotide {
                    source_name: name.to_string(),
                    base,
                    line: line_number,
                });
            }
            residues.extend(fragment.iter().map(|b| b.to_ascii_lowercase() as char));
        }

        if residues.is_empty() {
            return Err(ZcurveError::empty(name));
        }

        if skipped_headers > 0 {
            log::warn!(
                "{} contains {} additional header line(s); all records are concatenated into one sequence",
                name,
                skipped_headers
            );
        }

        let identifier = derive_identifier(name);
        log::debug!("Loaded {} ({} bp) from {}", identifier, residues.len(), name);

        Ok(LoadedSequence {
            identifier,
            sequence: Sequence::from_validated(residues),
            skipped_headers,
        })
    }
}

/// Identifier used for plot titles and artifact names: the last path segment,
/// cut at its first `.`. Falls back to the whole segment when that prefix is
/// empty (dot-files).
pub fn derive_identifier(name: &str) -> String {
    let segment = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match segment.split('.').next() {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => segment.to_string(),
    }
}

/// Load a FASTA file; see [`FastaLoader::load_file`].
pub fn load_fasta_file<P: AsRef<Path>>(path: P) -> Result<LoadedSequence> {
    FastaLoader::load_file(path)
}

/// Load FASTA text from a reader; see [`FastaLoader::load_reader`].
pub fn load_fasta<R: BufRead>(reader: R, name: &str) -> Result<LoadedSequence> {
    FastaLoader::load_reader(reader, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Cursor;

    fn load(text: &str) -> Result<LoadedSequence> {
        load_fasta(Cursor::new(text.as_bytes().to_vec()), "dir/sub/genome.fna")
    }

    #[test]
    fn test_concatenates_and_lowercases_body() {
        let loaded = load(">chr1 test\nACGT\nacgt  \n\nGG\n").unwrap();
        assert_eq!(loaded.sequence.as_str(), "acgtacgtgg");
        assert_eq!(loaded.identifier, "genome");
        assert_eq!(loaded.skipped_headers, 0);
    }

    #[test]
    fn test_missing_header_is_invalid_format() {
        let err = load("ACGT\nACGT\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_empty_input_is_invalid_format() {
        let err = load("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_invalid_nucleotide_reports_line() {
        let err = load(">h\nacgt\nacgtn\n").unwrap_err();
        match err {
            ZcurveError::InvalidNucleotide { base, line, .. } => {
                assert_eq!(base, 'n');
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_additional_headers_are_skipped() {
        let loaded = load(">r1\naaaa\n>r2\ncccc\n").unwrap();
        assert_eq!(loaded.sequence.as_str(), "aaaacccc");
        assert_eq!(loaded.skipped_headers, 1);
    }

    #[test]
    fn test_header_only_is_empty_sequence() {
        let err = load(">only a header\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptySequence);
    }

    #[test]
    fn test_crlf_line_endings() {
        let loaded = load(">h\r\nAC\r\nGT\r\n").unwrap();
        assert_eq!(loaded.sequence.as_str(), "acgt");
    }

    #[test]
    fn test_derive_identifier() {
        assert_eq!(derive_identifier("dir/sub/genome.fna"), "genome");
        assert_eq!(derive_identifier("zika.genome.fna.gz"), "zika");
        assert_eq!(derive_identifier("plain"), "plain");
        assert_eq!(derive_identifier("dir/.hidden.fna"), ".hidden.fna");
    }
}
