//! End-to-end decoding of on-disk instrument directories.

use std::fs;

use gcms_data::prelude::*;
use gcms_data::formats::agilent::synthetic::SyntheticRun;
use gcms_data::formats::agilent::{decode_mass, locate_data_file, DATA_FILE_NAMES};
use tempfile::TempDir;

/// Instrument directory with a single scan at 300 minutes.
fn one_scan_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    SyntheticRun::new()
        .with_scan(18_000_000, 1000, vec![(1000, 0x4005), (1200, 0x0010)])
        .write_to_dir(dir.path())
        .unwrap();
    dir
}

#[test]
fn test_read_one_scan_directory() {
    let dir = one_scan_dir();
    let dataset = read_agilent(dir.path()).unwrap();

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.time_list(), &[300.0]);
    assert_eq!(dataset.tic().intensity_list(), &[1000.0]);
    let scan = dataset.get_scan_at_index(0).unwrap();
    assert_eq!(scan.mass_list(), &[decode_mass(1000, 3), decode_mass(1200, 3)]);
    assert_eq!(scan.mass_list()[0], 16666.666666666668);
    assert_eq!(scan.intensity_list(), &[40.0, 16.0]);
}

#[test]
fn test_lowercase_data_file() {
    let dir = TempDir::new().unwrap();
    let bytes = SyntheticRun::ramp(5, 3, 1000).unwrap().to_bytes().unwrap();
    fs::write(dir.path().join(DATA_FILE_NAMES[1]), bytes).unwrap();

    assert!(locate_data_file(dir.path()).unwrap().ends_with("data.ms"));
    assert_eq!(read_agilent(dir.path()).unwrap().len(), 5);
}

#[test]
fn test_decode_twice_is_equal() {
    let dir = TempDir::new().unwrap();
    SyntheticRun::ramp(50, 20, 500).unwrap().write_to_dir(dir.path()).unwrap();

    let first = read_agilent(dir.path()).unwrap();
    let second = read_agilent(dir.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_ramp_invariants() {
    let dir = TempDir::new().unwrap();
    SyntheticRun::ramp(90, 30, 500).unwrap().write_to_dir(dir.path()).unwrap();
    let run = AgilentReader::new().read(dir.path()).unwrap();
    let dataset = &run.dataset;

    assert_eq!(dataset.time_list().len(), dataset.scan_list().len());
    assert!(dataset.time_list().windows(2).all(|w| w[0] < w[1]));

    let axis = run.mass_axis.masses();
    assert!(axis.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(run.matrix.dim(), (dataset.len(), axis.len()));
    for scan in dataset.scan_list() {
        assert_eq!(scan.mass_list(), axis);
    }

    // recorded totals agree with the decoded rows
    for (row, total) in run.matrix.rows().into_iter().zip(dataset.tic().intensity_list()) {
        assert_eq!(row.sum(), *total);
    }

    // neighbouring scans use shifted masses, so every row has zero columns
    assert!(run.matrix.rows().into_iter().all(|row| row.iter().any(|&v| v == 0.0)));
}

#[test]
fn test_trim_decoded_run() {
    let dir = TempDir::new().unwrap();
    // 0.5 s steps from 1 minute
    SyntheticRun::ramp(240, 10, 500).unwrap().write_to_dir(dir.path()).unwrap();
    let dataset = read_agilent(dir.path()).unwrap();

    let window = dataset
        .trim(Some("1.5m".parse().unwrap()), Some("120s".parse().unwrap()))
        .unwrap();
    assert_eq!(window.time_list().first(), Some(&1.5));
    assert_eq!(window.time_list().last(), Some(&2.0));
    assert_eq!(window.len(), 61);

    let tail = dataset.trim(Some(TrimBound::Scan(2)), None).unwrap();
    assert_eq!(tail.len(), dataset.len() - 2);
    assert_eq!(tail.time_list()[0], dataset.time_list()[2]);
}

#[test]
fn test_time_lookup_on_decoded_run() {
    let dir = one_scan_dir();
    let dataset = read_agilent(dir.path()).unwrap();
    assert_eq!(dataset.get_index_at_time(300.0).unwrap(), 0);
    assert!(matches!(
        dataset.get_index_at_time(299.0),
        Err(DatasetError::TimeOutOfRange { .. })
    ));
}

#[test]
fn test_missing_data_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("DATA.MS.bak"), b"not it").unwrap();
    assert!(matches!(
        read_agilent(dir.path()),
        Err(AgilentError::MissingDataFile(_))
    ));
}

#[test]
fn test_garbage_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("DATA.MS"), vec![0xFFu8; 600]).unwrap();
    assert!(read_agilent(dir.path()).is_err());
}

#[test]
fn test_header_json_roundtrip() {
    let dir = one_scan_dir();
    let header = AgilentReader::new().read_header(dir.path()).unwrap();
    let json = header.to_json().unwrap();
    let back: FileHeader = serde_json::from_str(&json).unwrap();
    assert_eq!(back, header);
}

#[test]
fn test_validator_accepts_decodable_directory() {
    let dir = TempDir::new().unwrap();
    SyntheticRun::ramp(10, 5, 500).unwrap().write_to_dir(dir.path()).unwrap();
    let report = validate_data_dir(dir.path()).unwrap();
    assert!(!report.has_failures(), "{}", report);
}
