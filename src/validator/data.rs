use std::io::{Read, Seek};

use anyhow::Result;

use crate::formats::agilent::header::FileHeader;
use crate::formats::agilent::scan::{decode_scan_region, read_scan_region};
use crate::formats::agilent::source::BinarySource;
use crate::formats::agilent::tic::read_tic;

use super::{ValidationCheck, ValidationReport};

/// Relative difference tolerated between a recorded TIC value and the sum of
/// the decoded intensities of its scan.
const TIC_TOLERANCE: f64 = 0.01;

/// Step 3: TIC directory contents and per-scan decode
pub(crate) fn check_data<R: Read + Seek>(
    source: &mut BinarySource<R>,
    header: &FileHeader,
    report: &mut ValidationReport,
) -> Result<()> {
    let tic = match read_tic(source, header) {
        Ok(tic) => {
            report.add_check(ValidationCheck::ok("TIC directory readable"));
            tic
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed("TIC directory readable", e.to_string()));
            return Ok(());
        }
    };

    if tic.is_strictly_ascending() {
        report.add_check(ValidationCheck::ok("Retention times increasing"));
    } else {
        let first = tic
            .time_list
            .windows(2)
            .position(|w| w[0] >= w[1])
            .map_or(0, |i| i + 1);
        report.add_check(ValidationCheck::warning(
            "Retention times increasing",
            format!("scan {} does not follow its predecessor in time", first),
        ));
    }

    let mut failed = Vec::new();
    let mut mismatched = 0usize;
    let mut empty = 0usize;
    for (scan, &offset) in header.offsets.xic.iter().enumerate() {
        let decoded = read_scan_region(source, offset, scan)
            .and_then(|bytes| decode_scan_region(&bytes, header.precision));
        let record = match decoded {
            Ok(record) => record,
            Err(e) => {
                failed.push((scan, e));
                continue;
            }
        };
        if record.is_empty() {
            empty += 1;
        }
        let total: f64 = record.intensities.iter().sum();
        let recorded = tic.intensities[scan];
        if (total - recorded).abs() > TIC_TOLERANCE * recorded.abs().max(1.0) {
            mismatched += 1;
        }
    }

    match failed.first() {
        None => report.add_check(ValidationCheck::ok("Scans decode")),
        Some((scan, e)) => report.add_check(ValidationCheck::failed(
            "Scans decode",
            format!("{} scan(s) failed, first scan {}: {}", failed.len(), scan, e),
        )),
    }

    if empty > 0 {
        report.add_check(ValidationCheck::warning(
            "Scans carry data",
            format!("{} scan(s) record no points", empty),
        ));
    }

    if mismatched == 0 {
        report.add_check(ValidationCheck::ok("TIC matches scan totals"));
    } else {
        report.add_check(ValidationCheck::warning(
            "TIC matches scan totals",
            format!(
                "{} scan(s) differ from their recorded TIC by more than {}%",
                mismatched,
                TIC_TOLERANCE * 100.0
            ),
        ));
    }

    Ok(())
}
