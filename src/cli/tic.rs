use anyhow::{Context, Result};
use gcms_data::formats::agilent::ReaderConfig;
use log::info;
use std::path::Path;

/// Print the TIC, or the trace of the mass nearest to `mass`, as TSV
pub fn run(dir: &Path, config: ReaderConfig, mass: Option<f64>) -> Result<()> {
    let run = super::read_run(dir, config)?;
    let dataset = &run.dataset;

    let trace = match mass {
        Some(mass) => {
            let trace = dataset
                .ion_chromatogram(mass)
                .context("Failed to extract ion chromatogram")?;
            info!("Extracted trace at mass {:?}", trace.mass());
            trace
        }
        None => dataset.tic().clone(),
    };

    match trace.mass() {
        Some(mass) => println!("# mass {}", mass),
        None => println!("# TIC"),
    }
    println!("time_min\tintensity");
    for (time, intensity) in trace.time_list().iter().zip(trace.intensity_list()) {
        println!("{:.5}\t{}", time, intensity);
    }

    Ok(())
}
