use std::ops::Range;

use log::debug;
use ndarray::Array2;

use super::{MassAxis, SparseScan};

/// Dense scans × mass-axis intensity matrix.
pub type IntensityMatrix = Array2<f64>;

/// Half-open point ranges of each scan within the concatenated point list.
pub fn run_bounds(counts: &[usize]) -> Vec<Range<usize>> {
    let mut start = 0;
    counts
        .iter()
        .map(|&count| {
            let run = start..start + count;
            start = run.end;
            run
        })
        .collect()
}

/// Scatter every scan's intensities into a zero-filled matrix.
///
/// Row `i` is scan `i`; columns follow `axis`. A mass recorded twice within
/// one scan keeps the intensity of its first occurrence. Masses missing from
/// the axis are skipped.
pub fn assemble_matrix<S: SparseScan>(axis: &MassAxis, scans: &[S]) -> IntensityMatrix {
    let masses: Vec<f64> = scans.iter().flat_map(|s| s.masses().iter().copied()).collect();
    let intensities: Vec<f64> = scans
        .iter()
        .flat_map(|s| s.intensities().iter().copied())
        .collect();
    let counts: Vec<usize> = scans.iter().map(|s| s.masses().len()).collect();

    let columns = axis.columns(&masses);
    let mut matrix = IntensityMatrix::zeros((scans.len(), axis.len()));

    // filled[col] == row + 1 marks a cell already written for this row
    let mut filled = vec![0usize; axis.len()];
    let mut duplicates = 0usize;

    for (row, run) in run_bounds(&counts).into_iter().enumerate() {
        for point in run {
            let Some(col) = columns[point] else {
                continue;
            };
            if filled[col] == row + 1 {
                duplicates += 1;
                continue;
            }
            filled[col] = row + 1;
            matrix[[row, col]] = intensities[point];
        }
    }

    if duplicates > 0 {
        debug!(
            "Ignored {} repeated masses within scans while assembling matrix",
            duplicates
        );
    }

    matrix
}
