//! TOML configuration file support.
//!
//! Reader settings can be kept in a file instead of repeated on every call:
//!
//! ```toml
//! # gcms.toml
//! [reader]
//! precision = 3
//! parallel = true
//! verify_scan_order = false
//! ```
//!
//! Command-line flags override values from the file.

use anyhow::{Context, Result};
use gcms_data::formats::agilent::ReaderConfig;
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for gcms.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Decoder settings.
    #[serde(default)]
    pub reader: ReaderSection,
}

/// The `[reader]` table; unset keys keep the decoder defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReaderSection {
    /// Mass rounding precision (decimal places).
    pub precision: Option<u32>,

    /// Decode scans in parallel (requires the parallel feature).
    pub parallel: Option<bool>,

    /// Reject files whose retention times do not strictly increase.
    pub verify_scan_order: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Reader configuration with this file's values applied over the defaults.
    pub fn reader_config(&self) -> ReaderConfig {
        let defaults = ReaderConfig::default();
        ReaderConfig {
            precision: self.reader.precision.unwrap_or(defaults.precision),
            parallel: self.reader.parallel.unwrap_or(defaults.parallel),
            verify_scan_order: self
                .reader
                .verify_scan_order
                .unwrap_or(defaults.verify_scan_order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [reader]
            precision = 2
            parallel = true
            verify_scan_order = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.reader.precision, Some(2));
        assert_eq!(config.reader.parallel, Some(true));
        let reader = config.reader_config();
        assert_eq!(reader.precision, 2);
        assert!(reader.verify_scan_order);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [reader]
            precision = 4
        "#;

        let config = Config::from_str(toml).unwrap();
        let reader = config.reader_config();
        assert_eq!(reader.precision, 4);
        assert!(!reader.verify_scan_order);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.reader_config(), ReaderConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_str("[reader]\nbatch_size = 10\n").is_err());
    }
}
