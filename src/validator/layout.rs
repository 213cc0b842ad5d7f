use std::io::{Read, Seek};

use anyhow::Result;

use crate::formats::agilent::header::{parse_header, FileHeader};
use crate::formats::agilent::layout::{DEFAULT_PRECISION, SCAN_HEADER_LEN, TIC_RECORD_LEN};
use crate::formats::agilent::source::BinarySource;

use super::{ValidationCheck, ValidationError, ValidationReport};

/// Step 2: header decode and offset bounds
///
/// The header carries the reader's default precision, so the data checks
/// decode scans exactly as [`crate::formats::agilent::read_agilent`] does.
pub(crate) fn check_layout<R: Read + Seek>(
    source: &mut BinarySource<R>,
    report: &mut ValidationReport,
) -> Result<FileHeader> {
    let header = match parse_header(source, DEFAULT_PRECISION) {
        Ok(header) => {
            report.add_check(ValidationCheck::ok(format!(
                "Header decodes ({} scans)",
                header.scan_count
            )));
            header
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed("Header decodes", e.to_string()));
            anyhow::bail!(ValidationError::LayoutError(e.to_string()));
        }
    };

    if header.method.date.as_datetime().is_some() {
        report.add_check(ValidationCheck::ok("Acquisition date"));
    } else {
        report.add_check(ValidationCheck::warning(
            "Acquisition date",
            format!("unrecognised date text '{}'", header.method.date),
        ));
    }

    let len = source.len();
    let tic_end = header.offsets.tic + header.scan_count as u64 * TIC_RECORD_LEN;
    if tic_end <= len {
        report.add_check(ValidationCheck::ok("TIC directory within file"));
    } else {
        report.add_check(ValidationCheck::failed(
            "TIC directory within file",
            format!("directory ends at byte {}, file is {} bytes", tic_end, len),
        ));
    }

    let outside: Vec<usize> = header
        .offsets
        .xic
        .iter()
        .enumerate()
        .filter(|(_, &offset)| offset + SCAN_HEADER_LEN > len)
        .map(|(scan, _)| scan)
        .collect();
    match outside.first() {
        None => report.add_check(ValidationCheck::ok("Scan records within file")),
        Some(first) => report.add_check(ValidationCheck::failed(
            "Scan records within file",
            format!(
                "{} scan record(s) start past the end of the file (first: scan {})",
                outside.len(),
                first
            ),
        )),
    }

    match header.offsets.normalization {
        Some(offset) if offset >= 0 && (offset as u64) < len => {
            report.add_check(ValidationCheck::ok("Normalization offset"))
        }
        Some(offset) => report.add_check(ValidationCheck::warning(
            "Normalization offset",
            format!("offset {} is outside the file", offset),
        )),
        None => report.add_check(ValidationCheck::warning(
            "Normalization offset",
            "file ends at the TIC directory",
        )),
    }

    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::agilent::synthetic::SyntheticRun;
    use crate::formats::agilent::ReaderConfig;
    use std::io::Cursor;

    #[test]
    fn test_header_uses_reader_precision() {
        let bytes = SyntheticRun::ramp(4, 3, 500).unwrap().to_bytes().unwrap();
        let mut source = BinarySource::new(Cursor::new(bytes), "ramp").unwrap();
        let mut report = ValidationReport::new("ramp");

        let header = check_layout(&mut source, &mut report).unwrap();
        assert_eq!(header.precision, ReaderConfig::default().precision);
        assert!(!report.has_failures());
    }
}
