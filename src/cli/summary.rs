use anyhow::{Context, Result};
use gcms_data::dataset::TrimBound;
use gcms_data::formats::agilent::ReaderConfig;
use log::info;
use std::path::Path;

/// Summarize a run, trimmed to `begin..=end` when either bound is given
pub fn run(
    dir: &Path,
    config: ReaderConfig,
    begin: Option<TrimBound>,
    end: Option<TrimBound>,
    json: bool,
) -> Result<()> {
    let mut dataset = super::read_run(dir, config)?.dataset;

    if begin.is_some() || end.is_some() {
        dataset
            .trim_in_place(begin, end)
            .context("Failed to trim dataset")?;
        info!("Trimmed to {} scans", dataset.len());
    }

    let summary = dataset.summary();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
    } else {
        print!("{}", summary);
    }

    Ok(())
}
