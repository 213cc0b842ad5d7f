use std::sync::Arc;

use super::DatasetError;
use crate::matrix::SparseScan;

/// Mass spectrum of one scan: parallel mass and intensity lists.
///
/// Spectra decoded from one file share a single mass list (the global mass
/// axis), so the masses are reference counted.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    mass_list: Arc<[f64]>,
    intensity_list: Vec<f64>,
}

impl Spectrum {
    /// Create a spectrum; both lists must have the same length.
    pub fn new(mass_list: Vec<f64>, intensity_list: Vec<f64>) -> Result<Self, DatasetError> {
        Self::with_shared_masses(mass_list.into(), intensity_list)
    }

    /// Create a spectrum over a shared mass list.
    pub fn with_shared_masses(
        mass_list: Arc<[f64]>,
        intensity_list: Vec<f64>,
    ) -> Result<Self, DatasetError> {
        if mass_list.len() != intensity_list.len() {
            return Err(DatasetError::SpectrumShape {
                masses: mass_list.len(),
                intensities: intensity_list.len(),
            });
        }
        Ok(Self {
            mass_list,
            intensity_list,
        })
    }

    /// Masses
    pub fn mass_list(&self) -> &[f64] {
        &self.mass_list
    }

    /// Intensities, parallel to [`Spectrum::mass_list`]
    pub fn intensity_list(&self) -> &[f64] {
        &self.intensity_list
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.mass_list.len()
    }

    /// Whether the spectrum has no points
    pub fn is_empty(&self) -> bool {
        self.mass_list.is_empty()
    }

    /// Smallest mass
    pub fn min_mass(&self) -> Option<f64> {
        self.mass_list.iter().copied().reduce(f64::min)
    }

    /// Largest mass
    pub fn max_mass(&self) -> Option<f64> {
        self.mass_list.iter().copied().reduce(f64::max)
    }

    /// Sum of all intensities
    pub fn total_intensity(&self) -> f64 {
        self.intensity_list.iter().sum()
    }

    /// Number of points with non-zero intensity
    pub fn nonzero_count(&self) -> usize {
        self.intensity_list.iter().filter(|&&i| i != 0.0).count()
    }

    /// Intensity at the mass closest to `mass`.
    pub fn intensity_near(&self, mass: f64) -> Option<f64> {
        self.mass_list
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - mass).abs().total_cmp(&(*b - mass).abs()))
            .map(|(idx, _)| self.intensity_list[idx])
    }
}

impl SparseScan for Spectrum {
    fn masses(&self) -> &[f64] {
        &self.mass_list
    }

    fn intensities(&self) -> &[f64] {
        &self.intensity_list
    }
}
