use anyhow::{Context, Result};
use gcms_data::formats::agilent::synthetic::SyntheticRun;
use log::info;
use std::path::Path;

/// One scan every 0.5 s.
const SCAN_STEP_RAW: i32 = 500;

/// Write a synthetic instrument directory
pub fn run(output: &Path, scans: usize, points: usize) -> Result<()> {
    let mut run = SyntheticRun::ramp(scans, points, SCAN_STEP_RAW)?
        .with_sample_name("demo")
        .with_date(chrono::Local::now().format("%d %b %y %I:%M %p").to_string());
    run.operator = "gcms".to_string();
    run.method = "DEMO.M".to_string();

    let path = run
        .write_to_dir(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Wrote {} scans x {} points to {}", scans, points, path.display());
    println!("{}", path.display());

    Ok(())
}
