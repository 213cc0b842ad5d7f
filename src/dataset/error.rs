/// Errors that can occur when building or querying a [`Dataset`](super::Dataset)
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Parallel lists disagree in length
    #[error("Length mismatch: {time_len} time points but {other_len} {what}")]
    ShapeMismatch {
        /// Which list disagreed with the time list
        what: &'static str,
        /// Length of the time list
        time_len: usize,
        /// Length of the other list
        other_len: usize,
    },

    /// Mass and intensity lists of a spectrum disagree in length
    #[error("Spectrum has {masses} masses but {intensities} intensities")]
    SpectrumShape {
        /// Number of masses
        masses: usize,
        /// Number of intensities
        intensities: usize,
    },

    /// `trim` called without either bound
    #[error("At least one of 'begin' or 'end' is required")]
    MissingBound,

    /// Scan index outside the dataset
    #[error("Index {index} out of range for {len} scans")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of scans
        len: usize,
    },

    /// Time outside the acquired range
    #[error("Time {time} min is outside the acquired range")]
    TimeOutOfRange {
        /// Requested time in minutes
        time: f64,
    },

    /// Time bound text could not be parsed
    #[error("Invalid time bound '{0}': expected a number with optional 'm' or 's' suffix")]
    InvalidTimeBound(String),

    /// Trim bounds select no scans
    #[error("Empty selection: {0}")]
    EmptySelection(String),
}
