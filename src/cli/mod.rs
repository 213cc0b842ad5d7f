use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gcms_data::dataset::TrimBound;
use gcms_data::formats::agilent::ReaderConfig;
use std::path::{Path, PathBuf};

mod check;
mod config;
mod demo;
mod info;
mod spectrum;
mod summary;
mod tic;

use config::Config;

/// gcms - Agilent ChemStation GC-MS data inspector
#[derive(Parser)]
#[command(name = "gcms")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    reader: ReaderArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Decoder settings shared by every subcommand that reads a run.
#[derive(Args)]
struct ReaderArgs {
    /// Load reader settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Mass rounding precision in decimal places (overrides the config file)
    #[arg(short = 'p', long, global = true)]
    precision: Option<u32>,

    /// Decode scans in parallel (requires the parallel feature)
    #[arg(long, global = true)]
    parallel: bool,

    /// Reject files whose retention times do not strictly increase
    #[arg(long, global = true)]
    strict: bool,
}

impl ReaderArgs {
    fn resolve(&self) -> Result<ReaderConfig> {
        let file_config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        let mut config = file_config.reader_config();
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        config.parallel |= self.parallel;
        config.verify_scan_order |= self.strict;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Display header metadata of an instrument directory
    Info {
        /// Instrument directory holding DATA.MS
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Print the header as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the total ion chromatogram (or one mass trace) as TSV
    Tic {
        /// Instrument directory holding DATA.MS
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Extract the trace of the nearest mass instead of the TIC
        #[arg(short, long)]
        mass: Option<f64>,
    },

    /// Print the spectrum of one scan as TSV
    Spectrum {
        /// Instrument directory holding DATA.MS
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// 0-based scan index
        #[arg(short, long, conflicts_with = "time", required_unless_present = "time")]
        index: Option<usize>,

        /// Retention time in minutes; the nearest scan is printed
        #[arg(short, long)]
        time: Option<f64>,

        /// Include masses the scan did not record (zero intensity)
        #[arg(long)]
        all: bool,
    },

    /// Summarize a run, optionally trimmed
    Summary {
        /// Instrument directory holding DATA.MS
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// First scan to keep: scan index, or time such as "5m" or "300s"
        #[arg(short, long, value_parser = parse_bound)]
        begin: Option<TrimBound>,

        /// Last scan to keep: scan index, or time such as "20m" or "1200s"
        #[arg(short, long, value_parser = parse_bound)]
        end: Option<TrimBound>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check an instrument directory against the DATA.MS layout
    Check {
        /// Instrument directory holding DATA.MS
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Write a synthetic instrument directory for testing
    Demo {
        /// Output directory
        #[arg(value_name = "DIR", default_value = "demo.D")]
        output: PathBuf,

        /// Number of scans
        #[arg(long, default_value_t = 600)]
        scans: usize,

        /// Points per scan
        #[arg(long, default_value_t = 120)]
        points: usize,
    },
}

/// Plain integers are scan indices; anything else is a time bound.
fn parse_bound(text: &str) -> Result<TrimBound, String> {
    if let Ok(index) = text.trim().parse::<usize>() {
        return Ok(TrimBound::Scan(index));
    }
    text.parse::<TrimBound>().map_err(|e| e.to_string())
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn read_run(dir: &Path, config: ReaderConfig) -> Result<gcms_data::formats::agilent::AgilentRun> {
    gcms_data::formats::agilent::AgilentReader::with_config(config)
        .read(dir)
        .with_context(|| format!("Failed to decode {}", dir.display()))
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { dir, json } => info::run(&dir, cli.reader.resolve()?, json),
        Commands::Tic { dir, mass } => tic::run(&dir, cli.reader.resolve()?, mass),
        Commands::Spectrum {
            dir,
            index,
            time,
            all,
        } => spectrum::run(&dir, cli.reader.resolve()?, index, time, all),
        Commands::Summary {
            dir,
            begin,
            end,
            json,
        } => summary::run(&dir, cli.reader.resolve()?, begin, end, json),
        Commands::Check { dir } => check::run(&dir),
        Commands::Demo {
            output,
            scans,
            points,
        } => demo::run(&output, scans, points),
    }
}
