//! Error types for Agilent ChemStation `DATA.MS` decoding.

use thiserror::Error;

use crate::dataset::DatasetError;

/// Errors that can occur while decoding an Agilent ChemStation MS file.
#[derive(Error, Debug)]
pub enum AgilentError {
    /// Path does not exist or is not a directory
    #[error("Invalid instrument path: {0}")]
    InvalidPath(String),

    /// The instrument directory holds neither `DATA.MS` nor `data.ms`
    #[error("{0} is not a valid instrument directory: no DATA.MS or data.ms file")]
    MissingDataFile(String),

    /// Computed offsets or counts are structurally invalid
    #[error("The file {file} does not meet the expected layout: {detail}")]
    InvalidFormat {
        /// File the layout error was found in
        file: String,
        /// What was wrong
        detail: String,
    },

    /// A read ran past the end of the file
    #[error("Truncated file: {context} at byte offset {offset} runs past end of file")]
    Truncated {
        /// Byte offset the read started at
        offset: u64,
        /// What was being read
        context: String,
    },

    /// A primitive decode was handed fewer bytes than its width
    #[error("Short buffer: expected {expected} bytes, got {actual}")]
    ShortBuffer {
        /// Required width in bytes
        expected: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// Reader configuration rejected before decoding
    #[error("Invalid reader configuration: {0}")]
    InvalidConfig(String),

    /// The decoded run could not be assembled into a dataset
    #[error("Dataset error: {0}")]
    DatasetError(#[from] DatasetError),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AgilentError {
    pub(crate) fn invalid_format(file: impl Into<String>, detail: impl Into<String>) -> Self {
        AgilentError::InvalidFormat {
            file: file.into(),
            detail: detail.into(),
        }
    }
}
