//! # gcms-data - Agilent ChemStation GC-MS Decoder
//!
//! `gcms_data` reads the proprietary big-endian `DATA.MS` file that Agilent
//! ChemStation writes into every instrument directory and turns it into a
//! dense, analysis-ready [`dataset::Dataset`]: a retention-time axis, one
//! spectrum per scan over a shared mass axis, and the total ion
//! chromatogram.
//!
//! ## Key Features
//!
//! - **Exact layout decoding**: header fields, TIC directory and per-scan
//!   records are read from the reverse-engineered fixed offsets.
//!
//! - **Dense alignment**: every scan's sparse mass list is merged into one
//!   sorted mass axis and scattered into a scans × masses `ndarray` matrix
//!   with zero fill.
//!
//! - **Lenient metadata**: acquisition dates are parsed when they match a
//!   known ChemStation format and kept verbatim otherwise.
//!
//! - **Optional parallel decode**: with the `parallel` feature, per-scan
//!   decoding runs on the rayon pool while scan order is preserved.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gcms_data::prelude::*;
//!
//! let dataset = read_agilent("samples/run01.D")?;
//! println!("{}", dataset.summary());
//!
//! // keep 5 to 20 minutes
//! let window = dataset.trim(Some(TrimBound::minutes(5.0)), Some(TrimBound::minutes(20.0)))?;
//! let scan = window.get_scan_at_index(window.get_index_at_time(12.0)?)?;
//! println!("{} masses", scan.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`formats::agilent`]: header, TIC and scan decoding plus the reader
//!   pipeline
//! - [`matrix`]: mass-axis unification and dense matrix assembly
//! - [`dataset`]: the decoded run with trim and time lookups
//! - [`validator`]: layout checks of an instrument directory with a report

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod dataset;
pub mod formats;
pub mod matrix;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::dataset::{Dataset, DatasetError, DatasetSummary, IonChromatogram, Spectrum, TrimBound};
    pub use crate::formats::agilent::{
        read_agilent, AcquisitionDate, AgilentError, AgilentReader, AgilentRun, FileHeader,
        ReaderConfig, TicSeries,
    };
    pub use crate::matrix::{IntensityMatrix, MassAxis};
    pub use crate::validator::{validate_data_dir, ValidationReport};
}
