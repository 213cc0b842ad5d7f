use anyhow::{Context, Result};
use gcms_data::formats::agilent::{AgilentReader, ReaderConfig};
use std::path::Path;

/// Display header metadata of an instrument directory
pub fn run(dir: &Path, config: ReaderConfig, json: bool) -> Result<()> {
    let header = AgilentReader::with_config(config)
        .read_header(dir)
        .with_context(|| format!("Failed to read header of {}", dir.display()))?;

    if json {
        println!("{}", header.to_json().context("Failed to serialize header")?);
        return Ok(());
    }

    println!("ChemStation MS File Information");
    println!("===============================");
    println!("Directory: {}", dir.display());
    println!();
    print!("{}", header);
    if let (Some(first), Some(last)) = (header.offsets.xic.first(), header.offsets.xic.last()) {
        println!("  Scan records: bytes {} .. {}", first, last);
    }

    Ok(())
}
