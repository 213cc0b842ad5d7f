use serde::{Deserialize, Serialize};

use super::layout::DEFAULT_PRECISION;
use super::AgilentError;

/// Largest accepted mass precision; `10^12` still multiplies a 16-bit code
/// without losing integer exactness in an `f64`.
pub const MAX_PRECISION: u32 = 12;

/// Configuration for decoding ChemStation MS files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Precision `p` of the mass formula `round(raw / 20 * 10^p) / p`
    pub precision: u32,
    /// Decode scans on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
    /// Reject files whose retention times do not strictly increase
    pub verify_scan_order: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            parallel: cfg!(feature = "parallel"),
            verify_scan_order: false,
        }
    }
}

impl ReaderConfig {
    /// Check the configuration before any file is touched.
    pub fn validate(&self) -> Result<(), AgilentError> {
        if self.precision == 0 || self.precision > MAX_PRECISION {
            return Err(AgilentError::InvalidConfig(format!(
                "precision must be between 1 and {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ReaderConfig::default();
        assert_eq!(config.precision, 3);
        assert!(!config.verify_scan_order);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_precision_bounds() {
        for precision in [0, MAX_PRECISION + 1] {
            let config = ReaderConfig {
                precision,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(AgilentError::InvalidConfig(_))
            ));
        }
    }
}
