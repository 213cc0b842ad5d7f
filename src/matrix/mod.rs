//! # Mass-axis alignment
//!
//! Every scan in a ChemStation file records its own sparse list of masses.
//! This module merges those lists into one global [`MassAxis`] and scatters
//! per-scan intensities onto a dense scans × masses [`IntensityMatrix`]
//! (an `ndarray::Array2<f64>`), with zero wherever a scan did not record a
//! mass.
//!
//! ```rust
//! use gcms_data::matrix::{assemble_matrix, MassAxis, SparseScan};
//! use gcms_data::formats::agilent::ScanRecord;
//!
//! let scans = vec![
//!     ScanRecord { masses: vec![73.0, 50.0], intensities: vec![10.0, 20.0] },
//!     ScanRecord { masses: vec![207.1], intensities: vec![5.0] },
//! ];
//! let axis = MassAxis::unify(scans.iter().map(|s| s.masses()));
//! let matrix = assemble_matrix(&axis, &scans);
//! assert_eq!(matrix.dim(), (2, 3));
//! assert_eq!(matrix[[0, 0]], 20.0);
//! ```

mod assemble;
mod axis;

pub use assemble::{assemble_matrix, run_bounds, IntensityMatrix};
pub use axis::MassAxis;

/// A scan's sparse (mass, intensity) points, in record order.
pub trait SparseScan {
    /// Masses, parallel to [`SparseScan::intensities`]
    fn masses(&self) -> &[f64];
    /// Intensities, parallel to [`SparseScan::masses`]
    fn intensities(&self) -> &[f64];
}

impl SparseScan for crate::formats::agilent::ScanRecord {
    fn masses(&self) -> &[f64] {
        &self.masses
    }

    fn intensities(&self) -> &[f64] {
        &self.intensities
    }
}
