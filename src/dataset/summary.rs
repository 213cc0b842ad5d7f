use std::fmt;

use serde::Serialize;

use super::Dataset;

/// Overview statistics of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Number of scans
    pub scan_count: usize,
    /// First retention time (minutes)
    pub rt_min: Option<f64>,
    /// Last retention time (minutes)
    pub rt_max: Option<f64>,
    /// Mean spacing between scans (minutes)
    pub time_step: Option<f64>,
    /// Standard deviation of the scan spacing (minutes)
    pub time_step_std: Option<f64>,
    /// Smallest mass
    pub min_mass: Option<f64>,
    /// Largest mass
    pub max_mass: Option<f64>,
    /// Mean number of non-zero points per scan
    pub mean_points: f64,
    /// Median number of non-zero points per scan
    pub median_points: f64,
}

impl DatasetSummary {
    pub(super) fn from_dataset(dataset: &Dataset) -> Self {
        let times = dataset.time_list();
        let steps: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
        let (time_step, time_step_std) = match steps.len() {
            0 => (None, None),
            n => {
                let mean = steps.iter().sum::<f64>() / n as f64;
                let var = steps.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;
                (Some(mean), Some(var.sqrt()))
            }
        };

        let mut points: Vec<usize> = dataset
            .scan_list()
            .iter()
            .map(|s| s.nonzero_count())
            .collect();
        points.sort_unstable();
        let mean_points = if points.is_empty() {
            0.0
        } else {
            points.iter().sum::<usize>() as f64 / points.len() as f64
        };
        let median_points = match points.len() {
            0 => 0.0,
            n if n % 2 == 1 => points[n / 2] as f64,
            n => (points[n / 2 - 1] + points[n / 2]) as f64 / 2.0,
        };

        Self {
            scan_count: dataset.len(),
            rt_min: times.first().copied(),
            rt_max: times.last().copied(),
            time_step,
            time_step_std,
            min_mass: dataset.min_mass(),
            max_mass: dataset.max_mass(),
            mean_points,
            median_points,
        }
    }
}

fn opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset Summary")?;
        writeln!(f, "===============")?;
        writeln!(
            f,
            "Retention time range: {} - {} min",
            opt(self.rt_min, 3),
            opt(self.rt_max, 3)
        )?;
        writeln!(
            f,
            "Time step: {} min (std {} min)",
            opt(self.time_step, 5),
            opt(self.time_step_std, 5)
        )?;
        writeln!(f, "Number of scans: {}", self.scan_count)?;
        writeln!(
            f,
            "Mass range: {} - {}",
            opt(self.min_mass, 3),
            opt(self.max_mass, 3)
        )?;
        writeln!(f, "Mean points per scan: {:.1}", self.mean_points)?;
        writeln!(f, "Median points per scan: {:.1}", self.median_points)
    }
}
