//! Decode pipeline: header, TIC directory, scans, mass axis, matrix, dataset.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::dataset::{Dataset, Spectrum};
use crate::matrix::{assemble_matrix, IntensityMatrix, MassAxis, SparseScan};

use super::config::ReaderConfig;
use super::header::{parse_header, FileHeader};
use super::scan::{decode_scan_region, read_scan_region, ScanRecord};
use super::source::BinarySource;
use super::tic::{read_tic, TicSeries};
use super::AgilentError;

/// File names probed, in order, inside an instrument directory.
pub const DATA_FILE_NAMES: [&str; 2] = ["DATA.MS", "data.ms"];

/// Find the MS data file inside an instrument directory.
pub fn locate_data_file<P: AsRef<Path>>(dir: P) -> Result<PathBuf, AgilentError> {
    let dir = dir.as_ref();

    if !dir.exists() {
        return Err(AgilentError::InvalidPath(format!(
            "Path does not exist: {}",
            dir.display()
        )));
    }

    if !dir.is_dir() {
        return Err(AgilentError::InvalidPath(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    DATA_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| AgilentError::MissingDataFile(dir.display().to_string()))
}

/// Everything decoded from one run.
#[derive(Debug, Clone)]
pub struct AgilentRun {
    /// File header and offset table
    pub header: FileHeader,
    /// Times and totals as recorded in the TIC directory
    pub tic: TicSeries,
    /// Global mass axis (matrix columns)
    pub mass_axis: MassAxis,
    /// Dense scans × masses intensities
    pub matrix: IntensityMatrix,
    /// Dataset built from the matrix rows
    pub dataset: Dataset,
}

/// Reader for Agilent ChemStation `DATA.MS` files.
#[derive(Debug, Clone, Default)]
pub struct AgilentReader {
    config: ReaderConfig,
}

impl AgilentReader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        #[cfg(not(feature = "parallel"))]
        if config.parallel {
            warn!("Parallel decode requested but the `parallel` feature is disabled; decoding sequentially");
        }
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Decode the instrument directory at `path`.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<AgilentRun, AgilentError> {
        self.config.validate()?;
        let data_file = locate_data_file(path)?;
        info!("Reading {}", data_file.display());

        let file = File::open(&data_file)?;
        self.read_from(BufReader::new(file), data_file.display().to_string())
    }

    /// Parse only the header of the instrument directory at `path`.
    pub fn read_header<P: AsRef<Path>>(&self, path: P) -> Result<FileHeader, AgilentError> {
        self.config.validate()?;
        let data_file = locate_data_file(path)?;
        let file = File::open(&data_file)?;
        let mut source = BinarySource::new(BufReader::new(file), data_file.display().to_string())?;
        parse_header(&mut source, self.config.precision)
    }

    /// Decode a ChemStation MS stream. `label` names the source in errors.
    pub fn read_from<R: Read + Seek>(
        &self,
        reader: R,
        label: impl Into<String>,
    ) -> Result<AgilentRun, AgilentError> {
        self.config.validate()?;
        let precision = self.config.precision;
        let mut source = BinarySource::new(reader, label)?;

        let header = parse_header(&mut source, precision)?;
        let tic = read_tic(&mut source, &header)?;
        debug!("TIC directory: {} records", tic.len());

        if !tic.is_strictly_ascending() {
            if self.config.verify_scan_order {
                return Err(AgilentError::invalid_format(
                    source.label(),
                    "retention times are not strictly increasing",
                ));
            }
            warn!("{}: retention times are not strictly increasing", source.label());
        }

        let mut regions = Vec::with_capacity(header.offsets.xic.len());
        for (scan, &offset) in header.offsets.xic.iter().enumerate() {
            regions.push(read_scan_region(&mut source, offset, scan)?);
        }
        let scans = self.decode_regions(&regions, precision)?;
        drop(regions);

        let mass_axis = MassAxis::unify(scans.iter().map(|s| s.masses()));
        let matrix = assemble_matrix(&mass_axis, &scans);
        debug!(
            "Assembled {} x {} intensity matrix",
            matrix.nrows(),
            matrix.ncols()
        );

        let shared: Arc<[f64]> = mass_axis.masses().into();
        let spectra = matrix
            .rows()
            .into_iter()
            .map(|row| Spectrum::with_shared_masses(Arc::clone(&shared), row.to_vec()))
            .collect::<Result<Vec<_>, _>>()?;
        let dataset = Dataset::with_tic(tic.time_list.clone(), spectra, tic.intensities.clone())?;

        info!(
            "Decoded {} scans over {} masses from {}",
            dataset.len(),
            mass_axis.len(),
            source.label()
        );

        Ok(AgilentRun {
            header,
            tic,
            mass_axis,
            matrix,
            dataset,
        })
    }

    fn decode_regions(
        &self,
        regions: &[Vec<u8>],
        precision: u32,
    ) -> Result<Vec<ScanRecord>, AgilentError> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return regions
                .par_iter()
                .map(|bytes| decode_scan_region(bytes, precision))
                .collect();
        }

        regions
            .iter()
            .map(|bytes| decode_scan_region(bytes, precision))
            .collect()
    }
}

/// Decode the instrument directory at `path` with default settings.
pub fn read_agilent<P: AsRef<Path>>(path: P) -> Result<Dataset, AgilentError> {
    AgilentReader::new().read(path).map(|run| run.dataset)
}
