//! # GC-MS Dataset Module
//!
//! [`Dataset`] is the in-memory result of decoding a run: a retention-time
//! list, one [`Spectrum`] per scan, and the total ion chromatogram. The time
//! list and the scan list always have the same length and stay paired; the
//! only way to change a dataset is [`Dataset::trim`], which re-slices both
//! together into a new aggregate.
//!
//! ## Usage
//!
//! ```rust
//! use gcms_data::dataset::{Dataset, Spectrum, TrimBound};
//!
//! let masses = vec![50.0, 73.0];
//! let scans = vec![
//!     Spectrum::new(masses.clone(), vec![10.0, 0.0])?,
//!     Spectrum::new(masses.clone(), vec![12.0, 3.0])?,
//!     Spectrum::new(masses.clone(), vec![0.0, 8.0])?,
//! ];
//! let data = Dataset::new(vec![1.0, 1.5, 2.0], scans)?;
//!
//! assert_eq!(data.get_index_at_time(1.6)?, 1);
//! let tail = data.trim(Some(TrimBound::Scan(1)), None)?;
//! assert_eq!(tail.time_list(), &[1.5, 2.0]);
//! # Ok::<(), gcms_data::dataset::DatasetError>(())
//! ```

mod chromatogram;
mod error;
mod spectrum;
mod summary;
mod trim;


pub use chromatogram::IonChromatogram;
pub use error::DatasetError;
pub use spectrum::Spectrum;
pub use summary::DatasetSummary;
pub use trim::TrimBound;

use crate::matrix::{assemble_matrix, IntensityMatrix, MassAxis, SparseScan};

/// Decoded GC-MS run: paired time list and scan list, plus the TIC.
///
/// Two datasets are equal when their time lists and scan lists are equal.
#[derive(Debug, Clone)]
pub struct Dataset {
    time_list: Vec<f64>,
    scan_list: Vec<Spectrum>,
    tic: IonChromatogram,
    min_mass: Option<f64>,
    max_mass: Option<f64>,
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.time_list == other.time_list && self.scan_list == other.scan_list
    }
}

impl Dataset {
    /// Create a dataset whose TIC is the summed intensity of each scan.
    pub fn new(time_list: Vec<f64>, scan_list: Vec<Spectrum>) -> Result<Self, DatasetError> {
        let tic = scan_list.iter().map(Spectrum::total_intensity).collect();
        Self::with_tic(time_list, scan_list, tic)
    }

    /// Create a dataset with a recorded TIC.
    pub fn with_tic(
        time_list: Vec<f64>,
        scan_list: Vec<Spectrum>,
        tic: Vec<f64>,
    ) -> Result<Self, DatasetError> {
        if time_list.len() != scan_list.len() {
            return Err(DatasetError::ShapeMismatch {
                what: "scans",
                time_len: time_list.len(),
                other_len: scan_list.len(),
            });
        }
        let tic = IonChromatogram::new(time_list.clone(), tic, None)?;
        let (min_mass, max_mass) = mass_bounds(&scan_list);
        Ok(Self {
            time_list,
            scan_list,
            tic,
            min_mass,
            max_mass,
        })
    }

    /// Retention times in minutes
    pub fn time_list(&self) -> &[f64] {
        &self.time_list
    }

    /// One spectrum per scan
    pub fn scan_list(&self) -> &[Spectrum] {
        &self.scan_list
    }

    /// Total ion chromatogram
    pub fn tic(&self) -> &IonChromatogram {
        &self.tic
    }

    /// Number of scans
    pub fn len(&self) -> usize {
        self.time_list.len()
    }

    /// Whether the dataset has no scans
    pub fn is_empty(&self) -> bool {
        self.time_list.is_empty()
    }

    /// Smallest mass over all scans
    pub fn min_mass(&self) -> Option<f64> {
        self.min_mass
    }

    /// Largest mass over all scans
    pub fn max_mass(&self) -> Option<f64> {
        self.max_mass
    }

    /// Index of the scan nearest to `time` (minutes).
    ///
    /// Fails when `time` lies before the first or after the last scan.
    pub fn get_index_at_time(&self, time: f64) -> Result<usize, DatasetError> {
        nearest_time_index(&self.time_list, time)
    }

    /// Retention time of scan `index`
    pub fn get_time_at_index(&self, index: usize) -> Result<f64, DatasetError> {
        self.time_list
            .get(index)
            .copied()
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Spectrum of scan `index`
    pub fn get_scan_at_index(&self, index: usize) -> Result<&Spectrum, DatasetError> {
        self.scan_list
            .get(index)
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Keep only the scans between `begin` and `end` (both inclusive).
    ///
    /// At least one bound is required. Returns a new dataset; time list, scan
    /// list and TIC are sliced together and the mass range recomputed.
    pub fn trim(
        &self,
        begin: Option<TrimBound>,
        end: Option<TrimBound>,
    ) -> Result<Dataset, DatasetError> {
        let (first, last) = trim::resolve_range(self, begin, end)?;
        let scan_list = self.scan_list[first..=last].to_vec();
        let (min_mass, max_mass) = mass_bounds(&scan_list);
        Ok(Dataset {
            time_list: self.time_list[first..=last].to_vec(),
            scan_list,
            tic: self.tic.slice(first, last),
            min_mass,
            max_mass,
        })
    }

    /// [`Dataset::trim`] replacing `self`. On error `self` is unchanged.
    pub fn trim_in_place(
        &mut self,
        begin: Option<TrimBound>,
        end: Option<TrimBound>,
    ) -> Result<(), DatasetError> {
        *self = self.trim(begin, end)?;
        Ok(())
    }

    /// Re-align the scans onto the union of their mass lists.
    pub fn intensity_matrix(&self) -> (MassAxis, IntensityMatrix) {
        let axis = MassAxis::unify(self.scan_list.iter().map(|s| s.masses()));
        let matrix = assemble_matrix(&axis, &self.scan_list);
        (axis, matrix)
    }

    /// Trace of the recorded mass nearest to `mass` across all scans.
    ///
    /// Scans that did not record that mass contribute zero intensity.
    pub fn ion_chromatogram(&self, mass: f64) -> Result<IonChromatogram, DatasetError> {
        let target = self
            .scan_list
            .iter()
            .flat_map(|scan| scan.mass_list().iter().copied())
            .min_by(|a, b| (a - mass).abs().total_cmp(&(b - mass).abs()))
            .ok_or_else(|| DatasetError::EmptySelection("dataset has no masses".to_string()))?;

        let intensities = self
            .scan_list
            .iter()
            .map(|scan| {
                scan.mass_list()
                    .iter()
                    .position(|&m| m == target)
                    .map_or(0.0, |idx| scan.intensity_list()[idx])
            })
            .collect();
        IonChromatogram::new(self.time_list.clone(), intensities, Some(target))
    }

    /// Overview statistics
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::from_dataset(self)
    }
}

fn mass_bounds(scans: &[Spectrum]) -> (Option<f64>, Option<f64>) {
    let min = scans.iter().filter_map(Spectrum::min_mass).reduce(f64::min);
    let max = scans.iter().filter_map(Spectrum::max_mass).reduce(f64::max);
    (min, max)
}

/// Index of the entry of an ascending time list nearest to `time`; ties go
/// to the earlier entry.
pub(crate) fn nearest_time_index(times: &[f64], time: f64) -> Result<usize, DatasetError> {
    let out_of_range = DatasetError::TimeOutOfRange { time };
    let (Some(&first), Some(&last)) = (times.first(), times.last()) else {
        return Err(out_of_range);
    };
    if !(first..=last).contains(&time) {
        return Err(out_of_range);
    }

    let idx = times.partition_point(|&t| t < time);
    if idx == 0 {
        return Ok(0);
    }
    let below = time - times[idx - 1];
    let above = times[idx] - time;
    Ok(if above < below { idx } else { idx - 1 })
}
