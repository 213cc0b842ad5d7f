//! # Instrument Directory Validation
//!
//! Checks an Agilent instrument directory against the ChemStation MS layout
//! without building the full dataset, and reports every problem it finds
//! instead of stopping at the first one.
//!
//! ## Validation Checklist
//!
//! 1. **Structure**: the path is a directory holding `DATA.MS` or `data.ms`
//!    large enough for the fixed header
//! 2. **Layout**: header fields decode, the TIC directory and every scan
//!    record lie inside the file
//! 3. **Data**: retention times increase, every scan decodes, recorded TIC
//!    values agree with the decoded intensities
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gcms_data::validator::validate_data_dir;
//! use std::path::Path;
//!
//! match validate_data_dir(Path::new("run01.D")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::formats::agilent::source::BinarySource;

pub use report::{CheckStatus, Tally, ValidationCheck, ValidationReport};

mod data;
mod layout;
mod report;
mod structure;

/// Errors that stop validation before all checks have run
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The directory or its data file is unusable
    #[error("Structure error: {0}")]
    StructureError(String),

    /// The header could not be decoded
    #[error("Layout error: {0}")]
    LayoutError(String),
}

/// Validate the instrument directory at `path`.
pub fn validate_data_dir(path: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    // 1. Structure
    let data_file = structure::check_structure(path, &mut report)?;

    let file = File::open(&data_file)
        .with_context(|| format!("Failed to open {}", data_file.display()))?;
    let mut source = BinarySource::new(BufReader::new(file), data_file.display().to_string())?;

    // 2. Layout
    let header = layout::check_layout(&mut source, &mut report)?;

    // 3. Data
    data::check_data(&mut source, &header, &mut report)?;

    Ok(report)
}
