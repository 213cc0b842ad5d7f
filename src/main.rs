//! # gcms
//!
//! Command-line inspector for Agilent ChemStation GC-MS instrument
//! directories.
//!
//! ## Usage
//!
//! ```bash
//! # Header metadata
//! gcms info run01.D
//!
//! # Total ion chromatogram, or the trace of one mass
//! gcms tic run01.D --mass 73
//!
//! # Spectrum nearest to 12.5 minutes
//! gcms spectrum run01.D --time 12.5
//!
//! # Summary of the 5 to 20 minute window
//! gcms summary run01.D --begin 5m --end 20m
//!
//! # Layout check
//! gcms check run01.D
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
