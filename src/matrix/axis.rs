use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sorted, duplicate-free union of every scan's decoded masses.
///
/// Masses are taken as decoded; the precision rounding already happened in
/// [`crate::formats::agilent::decode_mass`], so values here are bit-identical
/// to the per-scan ones. Columns of the dense intensity matrix are indexed by
/// position in this axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MassAxis {
    masses: Vec<f64>,
}

impl MassAxis {
    /// Build an axis from arbitrary masses: sort ascending, de-duplicate.
    pub fn from_masses(masses: impl IntoIterator<Item = f64>) -> Self {
        let mut masses: Vec<f64> = masses.into_iter().collect();
        masses.sort_unstable_by(f64::total_cmp);
        masses.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
        Self { masses }
    }

    /// Unify the mass lists of several scans.
    pub fn unify<'a, I>(scans: I) -> Self
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        Self::from_masses(scans.into_iter().flatten().copied())
    }

    /// Axis values
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Whether the axis has no columns
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Smallest mass
    pub fn min(&self) -> Option<f64> {
        self.masses.first().copied()
    }

    /// Largest mass
    pub fn max(&self) -> Option<f64> {
        self.masses.last().copied()
    }

    /// Column holding exactly `mass`, if the axis contains it.
    pub fn column_of(&self, mass: f64) -> Option<usize> {
        self.masses
            .binary_search_by(|m| m.total_cmp(&mass))
            .ok()
    }

    /// Column of every mass in `masses` (set-membership lookup).
    pub fn columns(&self, masses: &[f64]) -> Vec<Option<usize>> {
        masses.iter().map(|&m| self.column_of(m)).collect()
    }

    /// Column whose mass is closest to `mass`; ties go to the lower column.
    pub fn nearest_column(&self, mass: f64) -> Option<usize> {
        if self.masses.is_empty() {
            return None;
        }
        let idx = self.masses.partition_point(|&m| m.total_cmp(&mass) == Ordering::Less);
        if idx == 0 {
            return Some(0);
        }
        if idx == self.masses.len() {
            return Some(idx - 1);
        }
        let below = mass - self.masses[idx - 1];
        let above = self.masses[idx] - mass;
        Some(if above < below { idx } else { idx - 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::agilent::decode_mass;

    #[test]
    fn test_unify_sorts_and_dedups() {
        let a = [73.0, 50.0, 73.0];
        let b = [50.0, 207.1];
        let axis = MassAxis::unify([&a[..], &b[..]]);
        assert_eq!(axis.masses(), &[50.0, 73.0, 207.1]);
        assert_eq!(axis.min(), Some(50.0));
        assert_eq!(axis.max(), Some(207.1));
    }

    #[test]
    fn test_axis_keeps_decoded_values() {
        let decoded = [decode_mass(1200, 3), decode_mass(1000, 3)];
        let axis = MassAxis::unify([&decoded[..]]);
        assert_eq!(axis.masses(), &[decode_mass(1000, 3), decode_mass(1200, 3)]);
        assert_eq!(axis.masses()[0], 16666.666666666668);
    }

    #[test]
    fn test_column_lookup_is_exact() {
        let axis = MassAxis::from_masses([50.0, 73.0, 207.1]);
        assert_eq!(axis.column_of(73.0), Some(1));
        assert_eq!(axis.column_of(73.0002), None);
        assert_eq!(axis.columns(&[207.1, 50.0]), vec![Some(2), Some(0)]);
    }

    #[test]
    fn test_nearest_column() {
        let axis = MassAxis::from_masses([50.0, 73.0, 207.1]);
        assert_eq!(axis.nearest_column(10.0), Some(0));
        assert_eq!(axis.nearest_column(60.0), Some(0));
        assert_eq!(axis.nearest_column(62.0), Some(1));
        assert_eq!(axis.nearest_column(61.5), Some(0));
        assert_eq!(axis.nearest_column(500.0), Some(2));
        assert_eq!(MassAxis::default().nearest_column(1.0), None);
    }
}
