use std::io::Cursor;

use byteorder::{BigEndian, ByteOrder};
use chrono::{NaiveDate, Timelike};
use tempfile::tempdir;

use super::synthetic::SyntheticRun;
use super::*;

fn one_scan() -> SyntheticRun {
    SyntheticRun::new().with_scan(18_000_000, 1000, vec![(1000, 0x4005), (1200, 0x0010)])
}

fn decode(run: &SyntheticRun) -> Result<AgilentRun, AgilentError> {
    AgilentReader::new().read_from(Cursor::new(run.to_bytes().unwrap()), "synthetic")
}

#[test]
fn test_one_scan_end_to_end() {
    let run = decode(&one_scan()).unwrap();
    let data = &run.dataset;

    assert_eq!(data.time_list(), &[300.0]);
    assert_eq!(data.tic().intensity_list(), &[1000.0]);
    let expected = [decode_mass(1000, 3), decode_mass(1200, 3)];
    assert_eq!(expected, [16666.666666666668, 20000.0]);
    assert_eq!(run.mass_axis.masses(), &expected);
    assert_eq!(data.scan_list()[0].mass_list(), &expected);
    assert_eq!(data.scan_list()[0].intensity_list(), &[40.0, 16.0]);
    assert_eq!(run.matrix.dim(), (1, 2));
    assert_eq!(data.min_mass(), Some(16666.666666666668));
    assert_eq!(data.max_mass(), Some(20000.0));
}

#[test]
fn test_sparse_scans_zero_filled() {
    let synthetic = SyntheticRun::new()
        .with_scan(60_000, 10, vec![(1000, 5)])
        .with_scan(120_000, 20, vec![(1200, 7), (1000, 3)])
        .with_scan(180_000, 0, vec![]);
    let run = decode(&synthetic).unwrap();

    assert_eq!(run.dataset.time_list(), &[1.0, 2.0, 3.0]);
    assert_eq!(run.matrix.row(0).to_vec(), vec![5.0, 0.0]);
    assert_eq!(run.matrix.row(1).to_vec(), vec![3.0, 7.0]);
    assert_eq!(run.matrix.row(2).to_vec(), vec![0.0, 0.0]);
    // recorded totals are kept, not recomputed
    assert_eq!(run.dataset.tic().intensity_list(), &[10.0, 20.0, 0.0]);
}

#[test]
fn test_repeated_mass_first_occurrence_wins() {
    let synthetic = SyntheticRun::new().with_scan(60_000, 0, vec![(1000, 0x0010), (1000, 0x4005)]);
    let run = decode(&synthetic).unwrap();
    assert_eq!(run.mass_axis.len(), 1);
    assert_eq!(run.matrix.row(0).to_vec(), vec![16.0]);
}

#[test]
fn test_header_metadata() {
    let mut synthetic = one_scan()
        .with_sample_name("Alkane std")
        .with_date("02 Mar 21  10:15 am");
    synthetic.operator = "jd".to_string();
    synthetic.method = "ALKANES.M".to_string();
    synthetic.sequence_vial_replicate = [3, 12, 1];
    let header = decode(&synthetic).unwrap().header;

    assert_eq!(header.sample.name, "Alkane std");
    assert_eq!(header.sample.vial, 12);
    assert_eq!(header.sample.replicate, 1);
    assert_eq!(header.method.operator, "jd");
    assert_eq!(header.method.name, "ALKANES.M");
    assert_eq!(header.instrument.inlet, "GC");
    assert_eq!(header.scan_count, 1);
    assert_eq!(header.offsets.tic, 512);
    assert_eq!(header.precision, 3);

    let date = header.method.date.as_datetime().unwrap();
    assert_eq!(date.date(), NaiveDate::from_ymd_opt(2021, 3, 2).unwrap());
    assert_eq!(date.hour(), 10);
    assert!(header.to_json().unwrap().contains("Alkane std"));
}

#[test]
fn test_unparsed_date_kept_raw() {
    let synthetic = one_scan().with_date("sometime");
    let header = decode(&synthetic).unwrap().header;
    assert_eq!(header.method.date, AcquisitionDate::Raw("sometime".to_string()));
}

#[test]
fn test_normalization_offset() {
    let header = decode(&one_scan().with_normalization(1000)).unwrap().header;
    assert_eq!(header.offsets.normalization, Some(1998));
}

#[test]
fn test_empty_run() {
    let run = decode(&SyntheticRun::new()).unwrap();
    assert!(run.dataset.is_empty());
    assert!(run.mass_axis.is_empty());
    assert_eq!(run.matrix.dim(), (0, 0));
}

#[test]
fn test_short_header_rejected() {
    let err = AgilentReader::new()
        .read_from(Cursor::new(vec![0u8; 100]), "short")
        .unwrap_err();
    assert!(matches!(err, AgilentError::InvalidFormat { .. }));
}

#[test]
fn test_negative_tic_offset_rejected() {
    let mut bytes = one_scan().to_bytes().unwrap();
    BigEndian::write_i32(&mut bytes[layout::TIC_OFFSET.offset as usize..], 0);
    let err = AgilentReader::new()
        .read_from(Cursor::new(bytes), "bad")
        .unwrap_err();
    match err {
        AgilentError::InvalidFormat { detail, .. } => assert!(detail.contains("negative")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_negative_scan_offset_rejected() {
    // TIC directory of synthetic files starts at byte 512
    let scan_offset_field = |scan: usize| {
        512 + scan * layout::TIC_RECORD_LEN as usize + layout::TIC_XIC_FIELD as usize
    };
    let two_scans = one_scan().with_scan(18_060_000, 5, vec![(1000, 5)]);

    for scan in [0usize, 1] {
        let mut bytes = two_scans.to_bytes().unwrap();
        BigEndian::write_i32(&mut bytes[scan_offset_field(scan)..], 0);
        let err = AgilentReader::new()
            .read_from(Cursor::new(bytes), "bad-scan")
            .unwrap_err();
        match err {
            AgilentError::InvalidFormat { file, detail } => {
                assert_eq!(file, "bad-scan");
                assert!(detail.contains("negative"), "{detail}");
                assert!(detail.ends_with(&format!("scan {scan}")), "{detail}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn test_truncated_scan_rejected() {
    let mut bytes = one_scan().to_bytes().unwrap();
    bytes.truncate(bytes.len() - 3);
    let err = AgilentReader::new()
        .read_from(Cursor::new(bytes), "truncated")
        .unwrap_err();
    assert!(matches!(err, AgilentError::Truncated { .. }));
}

#[test]
fn test_scan_order_verification() {
    let synthetic = SyntheticRun::new()
        .with_scan(120_000, 0, vec![(1000, 1)])
        .with_scan(60_000, 0, vec![(1000, 2)]);

    // lenient by default
    assert!(decode(&synthetic).is_ok());

    let strict = AgilentReader::with_config(ReaderConfig {
        verify_scan_order: true,
        ..Default::default()
    });
    let err = strict
        .read_from(Cursor::new(synthetic.to_bytes().unwrap()), "unordered")
        .unwrap_err();
    assert!(matches!(err, AgilentError::InvalidFormat { .. }));
}

#[test]
fn test_invalid_precision_rejected() {
    let reader = AgilentReader::with_config(ReaderConfig {
        precision: 0,
        ..Default::default()
    });
    let err = reader
        .read_from(Cursor::new(one_scan().to_bytes().unwrap()), "p0")
        .unwrap_err();
    assert!(matches!(err, AgilentError::InvalidConfig(_)));
}

#[test]
fn test_precision_changes_axis() {
    let reader = AgilentReader::with_config(ReaderConfig {
        precision: 2,
        ..Default::default()
    });
    let run = reader
        .read_from(Cursor::new(one_scan().to_bytes().unwrap()), "p2")
        .unwrap();
    // round(50 * 100) / 2 and round(60 * 100) / 2
    assert_eq!(run.mass_axis.masses(), &[2500.0, 3000.0]);
}

#[test]
fn test_read_directory_variants() {
    let dir = tempdir().unwrap();
    let upper = dir.path().join("upper.D");
    one_scan().write_to_dir(&upper).unwrap();
    let lower = dir.path().join("lower.D");
    std::fs::create_dir(&lower).unwrap();
    std::fs::write(lower.join("data.ms"), one_scan().to_bytes().unwrap()).unwrap();

    let a = read_agilent(&upper).unwrap();
    let b = read_agilent(&lower).unwrap();
    assert_eq!(a, b);
    assert_eq!(locate_data_file(&upper).unwrap(), upper.join("DATA.MS"));
}

#[test]
fn test_read_header_only() {
    let dir = tempdir().unwrap();
    one_scan()
        .with_sample_name("header only")
        .write_to_dir(dir.path())
        .unwrap();
    let header = AgilentReader::new().read_header(dir.path()).unwrap();
    assert_eq!(header.sample.name, "header only");
    assert_eq!(header.offsets.xic.len(), 1);
}

#[test]
fn test_missing_data_file() {
    let dir = tempdir().unwrap();
    let err = read_agilent(dir.path()).unwrap_err();
    assert!(matches!(err, AgilentError::MissingDataFile(_)));
    assert!(err.to_string().contains("not a valid instrument directory"));
}

#[test]
fn test_invalid_paths() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        read_agilent(dir.path().join("nope")),
        Err(AgilentError::InvalidPath(_))
    ));

    let file = dir.path().join("DATA.MS");
    std::fs::write(&file, one_scan().to_bytes().unwrap()).unwrap();
    assert!(matches!(read_agilent(&file), Err(AgilentError::InvalidPath(_))));
}

#[test]
fn test_decode_is_deterministic() {
    let synthetic = SyntheticRun::ramp(40, 25, 500).unwrap();
    let a = decode(&synthetic).unwrap();
    let b = decode(&synthetic).unwrap();
    assert_eq!(a.dataset, b.dataset);
    assert_eq!(a.matrix, b.matrix);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    let bytes = SyntheticRun::ramp(64, 40, 250).unwrap().to_bytes().unwrap();
    let decode_with = |parallel| {
        AgilentReader::with_config(ReaderConfig {
            parallel,
            ..Default::default()
        })
        .read_from(Cursor::new(bytes.clone()), "ramp")
        .unwrap()
    };
    let par = decode_with(true);
    let seq = decode_with(false);
    assert_eq!(par.dataset, seq.dataset);
    assert_eq!(par.mass_axis, seq.mass_axis);
}
