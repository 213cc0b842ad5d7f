use anyhow::Result;
use gcms_data::validator::validate_data_dir;
use log::info;
use std::path::Path;

/// Validate an instrument directory
pub fn run(dir: &Path) -> Result<()> {
    info!("Checking {}", dir.display());

    match validate_data_dir(dir) {
        Ok(report) => {
            println!("{}", report.format_colored());

            // Exit with error code if validation failed
            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
