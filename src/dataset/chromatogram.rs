use super::{nearest_time_index, DatasetError};

/// Intensity of one trace (the TIC or a single mass) over retention time.
#[derive(Debug, Clone, PartialEq)]
pub struct IonChromatogram {
    time_list: Vec<f64>,
    intensity_list: Vec<f64>,
    mass: Option<f64>,
}

impl IonChromatogram {
    /// Create a chromatogram; `mass` is `None` for the TIC.
    pub fn new(
        time_list: Vec<f64>,
        intensity_list: Vec<f64>,
        mass: Option<f64>,
    ) -> Result<Self, DatasetError> {
        if time_list.len() != intensity_list.len() {
            return Err(DatasetError::ShapeMismatch {
                what: "intensities",
                time_len: time_list.len(),
                other_len: intensity_list.len(),
            });
        }
        Ok(Self {
            time_list,
            intensity_list,
            mass,
        })
    }

    /// Retention times in minutes
    pub fn time_list(&self) -> &[f64] {
        &self.time_list
    }

    /// Intensities, parallel to [`IonChromatogram::time_list`]
    pub fn intensity_list(&self) -> &[f64] {
        &self.intensity_list
    }

    /// Mass this trace was extracted at; `None` for the TIC
    pub fn mass(&self) -> Option<f64> {
        self.mass
    }

    /// Whether this is the total ion chromatogram
    pub fn is_tic(&self) -> bool {
        self.mass.is_none()
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.time_list.len()
    }

    /// Whether the trace has no points
    pub fn is_empty(&self) -> bool {
        self.time_list.is_empty()
    }

    /// Index of the point nearest to `time` (minutes)
    pub fn get_index_at_time(&self, time: f64) -> Result<usize, DatasetError> {
        nearest_time_index(&self.time_list, time)
    }

    /// Time at `index`
    pub fn get_time_at_index(&self, index: usize) -> Result<f64, DatasetError> {
        self.time_list
            .get(index)
            .copied()
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Intensity at `index`
    pub fn get_intensity_at_index(&self, index: usize) -> Result<f64, DatasetError> {
        self.intensity_list
            .get(index)
            .copied()
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Mean spacing between consecutive points, in minutes
    pub fn time_step(&self) -> Option<f64> {
        if self.time_list.len() < 2 {
            return None;
        }
        let span = self.time_list[self.time_list.len() - 1] - self.time_list[0];
        Some(span / (self.time_list.len() - 1) as f64)
    }

    /// Sub-trace over the inclusive index range `first..=last`
    pub(crate) fn slice(&self, first: usize, last: usize) -> Self {
        Self {
            time_list: self.time_list[first..=last].to_vec(),
            intensity_list: self.intensity_list[first..=last].to_vec(),
            mass: self.mass,
        }
    }
}
