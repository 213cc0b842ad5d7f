use anyhow::{bail, Context, Result};
use gcms_data::formats::agilent::ReaderConfig;
use std::path::Path;

/// Print one scan's spectrum as TSV
pub fn run(
    dir: &Path,
    config: ReaderConfig,
    index: Option<usize>,
    time: Option<f64>,
    all: bool,
) -> Result<()> {
    let run = super::read_run(dir, config)?;
    let dataset = &run.dataset;

    let index = match (index, time) {
        (Some(index), _) => index,
        (None, Some(time)) => dataset
            .get_index_at_time(time)
            .with_context(|| format!("No scan near {} min", time))?,
        (None, None) => bail!("Either --index or --time is required"),
    };
    let scan = dataset.get_scan_at_index(index)?;
    let time = dataset.get_time_at_index(index)?;

    println!("# scan {} at {:.5} min", index, time);
    println!("mass\tintensity");
    for (mass, intensity) in scan.mass_list().iter().zip(scan.intensity_list()) {
        if all || *intensity != 0.0 {
            println!("{}\t{}", mass, intensity);
        }
    }

    Ok(())
}
