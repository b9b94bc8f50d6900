use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::{tempdir, NamedTempFile};
use zcurve_core::{gc_percent, load_fasta_file, zcurve_coordinates, ErrorKind, TransformMatrix};

#[test]
fn load_plain_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, ">NC_012532.1 Zika virus").unwrap();
    writeln!(file, "AGTTGTTGATCTGTGTGA").unwrap();
    writeln!(file, "GTCAGACTGCGACAGTTC").unwrap();

    let loaded = load_fasta_file(file.path()).expect("load fasta");
    assert_eq!(loaded.sequence.len(), 36);
    assert!(loaded.sequence.as_str().chars().all(|c| "acgt".contains(c)));

    let coords = zcurve_coordinates(&loaded.sequence, &TransformMatrix::zcurve());
    assert_eq!(coords.len(), 36);
    let gc = gc_percent(&loaded.sequence).unwrap();
    assert!(gc > 0.0 && gc < 100.0);
}

#[test]
fn load_gzipped_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("phage.fna.gz");
    let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(b">phage\nGGGG\nCCCC\n").unwrap();
    encoder.finish().unwrap();

    let loaded = load_fasta_file(&path).expect("load gz fasta");
    assert_eq!(loaded.identifier, "phage");
    assert_eq!(loaded.sequence.as_str(), "ggggcccc");
}

#[test]
fn file_without_marker_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ACGT").unwrap();
    let err = load_fasta_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn body_with_n_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, ">x").unwrap();
    writeln!(file, "acgtn").unwrap();
    let err = load_fasta_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidNucleotide);
}

#[test]
fn identifier_comes_from_file_name() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).unwrap();
    let path = sub.join("genome.fna");
    std::fs::write(&path, ">g\nacgt\n").unwrap();

    let loaded = load_fasta_file(&path).unwrap();
    assert_eq!(loaded.identifier, "genome");
}
