//! Agilent ChemStation GC-MS (`DATA.MS`) decoding.
//!
//! # Layout
//!
//! A ChemStation MS file is a big-endian binary with a fixed header, a TIC
//! directory of 12-byte records (one per scan) and a variable-length record
//! per scan holding packed mass/intensity pairs. See [`layout`] for the
//! offsets.
//!
//! # Pipeline
//!
//! 1. Header fields and the per-scan offset table ([`FileHeader`])
//! 2. Retention times and recorded totals ([`TicSeries`])
//! 3. Per-scan mass/intensity decode ([`ScanRecord`])
//! 4. Global mass axis and dense intensity matrix ([`crate::matrix`])
//! 5. [`crate::dataset::Dataset`]
//!
//! Step 3 runs on the rayon pool when the `parallel` feature is enabled and
//! [`ReaderConfig::parallel`] is set; scan order is preserved either way.
//!
//! # Example
//!
//! ```no_run
//! use gcms_data::formats::agilent::{read_agilent, AgilentReader, ReaderConfig};
//!
//! let dataset = read_agilent("run01.D")?;
//! println!("{} scans", dataset.len());
//!
//! let reader = AgilentReader::with_config(ReaderConfig {
//!     precision: 2,
//!     ..Default::default()
//! });
//! let run = reader.read("run01.D")?;
//! println!("{}", run.header);
//! println!("matrix {:?}", run.matrix.dim());
//! # Ok::<(), gcms_data::formats::agilent::AgilentError>(())
//! ```

mod config;
mod error;
pub(crate) mod header;
pub mod layout;
mod primitive;
mod reader;
pub(crate) mod scan;
pub(crate) mod source;
pub mod synthetic;
pub(crate) mod tic;

#[cfg(test)]
mod tests;

pub use config::{ReaderConfig, MAX_PRECISION};
pub use error::AgilentError;
pub use header::{AcquisitionDate, FileHeader, InstrumentInfo, LayoutOffsets, MethodInfo, SampleInfo};
pub use primitive::{int16, int32, uint16, uint32, uint8};
pub use reader::{locate_data_file, read_agilent, AgilentReader, AgilentRun, DATA_FILE_NAMES};
pub use scan::{decode_intensity, decode_mass, decode_scan_region, point_count, ScanRecord};
pub use tic::TicSeries;
