use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::formats::agilent::layout::HEADER_LEN;
use crate::formats::agilent::DATA_FILE_NAMES;

use super::{ValidationCheck, ValidationError, ValidationReport};

/// Step 1: the directory and its data file
pub(crate) fn check_structure(path: &Path, report: &mut ValidationReport) -> Result<PathBuf> {
    if !path.exists() {
        report.add_check(ValidationCheck::failed(
            "Path exists",
            format!("Path does not exist: {}", path.display()),
        ));
        anyhow::bail!(ValidationError::StructureError("Path does not exist".to_string()));
    }
    report.add_check(ValidationCheck::ok("Path exists"));

    if !path.is_dir() {
        report.add_check(ValidationCheck::failed(
            "Path is a directory",
            "Instrument data is a directory holding DATA.MS",
        ));
        anyhow::bail!(ValidationError::StructureError("Not a directory".to_string()));
    }
    report.add_check(ValidationCheck::ok("Path is a directory"));

    let Some(data_file) = DATA_FILE_NAMES
        .iter()
        .map(|name| path.join(name))
        .find(|candidate| candidate.is_file())
    else {
        report.add_check(ValidationCheck::failed(
            "Data file present",
            format!("Neither {} found", DATA_FILE_NAMES.join(" nor ")),
        ));
        anyhow::bail!(ValidationError::StructureError("No DATA.MS or data.ms".to_string()));
    };
    report.add_check(ValidationCheck::ok(format!(
        "Data file present ({})",
        data_file.file_name().map_or_else(String::new, |n| n.to_string_lossy().into_owned())
    )));

    let size = std::fs::metadata(&data_file)?.len();
    if size < HEADER_LEN {
        report.add_check(ValidationCheck::failed(
            "Header size",
            format!("{} bytes, the fixed header needs {}", size, HEADER_LEN),
        ));
        anyhow::bail!(ValidationError::StructureError("File shorter than header".to_string()));
    }
    report.add_check(ValidationCheck::ok("Header size"));

    Ok(data_file)
}
