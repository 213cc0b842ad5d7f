//! Builder for synthetic ChemStation MS files.
//!
//! Produces byte-exact files in the layout described in [`super::layout`],
//! for demos, benchmarks, fuzz seeds and tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ByteOrder};
use thiserror::Error;

use super::layout::{self, FieldEncoding, HeaderField, HEADER_LAYOUT};
use super::scan::decode_intensity;

/// Byte offset of the TIC directory in generated files.
const TIC_START: usize = 512;

/// Most points one scan record can declare in its 16-bit size word.
pub const MAX_SCAN_POINTS: usize = (i16::MAX as usize - 14) / 2;

/// First raw mass code used by [`SyntheticRun::ramp`].
const RAMP_MASS_START: u32 = 800;
/// Raw mass code step between neighbouring peaks of a ramp scan.
const RAMP_MASS_STEP: u32 = 20;
/// Largest per-scan shift of the ramp mass codes.
const RAMP_MASS_SHIFT: u32 = 20;

/// Most peaks per scan [`SyntheticRun::ramp`] can encode in 16-bit mass codes.
pub const MAX_RAMP_POINTS: usize =
    ((u16::MAX as u32 - RAMP_MASS_START - RAMP_MASS_SHIFT) / RAMP_MASS_STEP + 1) as usize;

/// Errors raised while building a synthetic file.
#[derive(Error, Debug)]
pub enum SyntheticError {
    /// A scan holds more points than its size word can declare
    #[error("scan {scan} has {points} points, at most {max} fit in a scan record", max = MAX_SCAN_POINTS)]
    TooManyPoints {
        /// Scan index
        scan: usize,
        /// Points in the scan
        points: usize,
    },

    /// Ramp peaks would not fit into 16-bit mass codes
    #[error("a ramp scan holds at most {max} peaks, {0} requested", max = MAX_RAMP_POINTS)]
    RampTooWide(usize),

    /// File system error writing the directory
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// One scan of a synthetic run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticScan {
    /// Raw retention time (milliseconds)
    pub time_raw: i32,
    /// Recorded total ion current
    pub total: i32,
    /// Raw `(mass code, intensity code)` pairs
    pub points: Vec<(u16, u16)>,
}

/// In-memory description of a ChemStation MS file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticRun {
    /// Sample name
    pub sample_name: String,
    /// Sample description
    pub description: String,
    /// Operator
    pub operator: String,
    /// Acquisition date text
    pub date: String,
    /// Instrument name
    pub instrument: String,
    /// Inlet
    pub inlet: String,
    /// Method name
    pub method: String,
    /// Sequence, vial and replicate numbers
    pub sequence_vial_replicate: [i16; 3],
    /// Raw normalization word address written after the TIC directory
    pub normalization: Option<i32>,
    /// Scans in file order
    pub scans: Vec<SyntheticScan>,
}

impl SyntheticRun {
    /// Empty run with placeholder metadata.
    pub fn new() -> Self {
        Self {
            sample_name: "synthetic".to_string(),
            instrument: "GC/MS".to_string(),
            inlet: "GC".to_string(),
            ..Default::default()
        }
    }

    /// Set the sample name.
    pub fn with_sample_name(mut self, name: impl Into<String>) -> Self {
        self.sample_name = name.into();
        self
    }

    /// Set the acquisition date text.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set the normalization word address.
    pub fn with_normalization(mut self, raw: i32) -> Self {
        self.normalization = Some(raw);
        self
    }

    /// Append a scan.
    pub fn with_scan(mut self, time_raw: i32, total: i32, points: Vec<(u16, u16)>) -> Self {
        self.scans.push(SyntheticScan {
            time_raw,
            total,
            points,
        });
        self
    }

    /// A run of `scans` scans, one every `step_raw` time units, each with
    /// `points` peaks over a mass range shared between neighbouring scans.
    /// Recorded totals match the decoded intensities.
    ///
    /// Fails when `points` exceeds [`MAX_RAMP_POINTS`].
    pub fn ramp(scans: usize, points: usize, step_raw: i32) -> Result<Self, SyntheticError> {
        if points > MAX_RAMP_POINTS {
            return Err(SyntheticError::RampTooWide(points));
        }
        let mut run = Self::new().with_sample_name("ramp");
        for scan in 0..scans {
            let shift = (RAMP_MASS_SHIFT / 2) * (scan % 3) as u32;
            let peaks: Vec<(u16, u16)> = (0..points)
                .map(|p| {
                    let mass = RAMP_MASS_START + RAMP_MASS_STEP * p as u32 + shift;
                    let intensity = ((scan * 37 + p * 101) % 0x3FFF) as u16 | ((p % 4) as u16) << 14;
                    (mass as u16, intensity)
                })
                .collect();
            let total: f64 = peaks.iter().map(|&(_, code)| decode_intensity(code)).sum();
            let time = 60_000 + step_raw * scan as i32;
            run = run.with_scan(time, total as i32, peaks);
        }
        Ok(run)
    }

    /// Serialize to the on-disk byte layout.
    ///
    /// Fails when a scan holds more than [`MAX_SCAN_POINTS`] points.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SyntheticError> {
        let n = self.scans.len();
        let size_words = self
            .scans
            .iter()
            .enumerate()
            .map(|(scan, s)| {
                size_word(s.points.len()).ok_or(SyntheticError::TooManyPoints {
                    scan,
                    points: s.points.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let tic_len = n * layout::TIC_RECORD_LEN as usize + 4;
        let mut scan_offsets = Vec::with_capacity(n);
        let mut cursor = TIC_START + tic_len;
        for scan in &self.scans {
            scan_offsets.push(cursor);
            cursor += layout::SCAN_HEADER_LEN as usize + scan.points.len() * layout::SCAN_POINT_LEN;
            // records start on even offsets so they are word addressable
            cursor += cursor % 2;
        }

        let mut buf = vec![0u8; cursor];
        for (field, text) in [
            (layout::SAMPLE_NAME, &self.sample_name),
            (layout::SAMPLE_DESCRIPTION, &self.description),
            (layout::OPERATOR, &self.operator),
            (layout::ACQUISITION_DATE, &self.date),
            (layout::INSTRUMENT_NAME, &self.instrument),
            (layout::INLET, &self.inlet),
            (layout::METHOD_NAME, &self.method),
        ] {
            write_pascal(&mut buf, field, text);
        }

        let triplet = layout::SEQUENCE_VIAL_REPLICATE.offset as usize;
        for (i, value) in self.sequence_vial_replicate.iter().enumerate() {
            BigEndian::write_i16(&mut buf[triplet + 2 * i..], *value);
        }
        BigEndian::write_i32(
            &mut buf[layout::TIC_OFFSET.offset as usize..],
            word_address(TIC_START),
        );
        BigEndian::write_u32(&mut buf[layout::SCAN_COUNT.offset as usize..], n as u32);

        for (i, ((scan, &offset), &size)) in self
            .scans
            .iter()
            .zip(&scan_offsets)
            .zip(&size_words)
            .enumerate()
        {
            let record = TIC_START + i * layout::TIC_RECORD_LEN as usize;
            BigEndian::write_i32(
                &mut buf[record + layout::TIC_XIC_FIELD as usize..],
                word_address(offset),
            );
            BigEndian::write_i32(&mut buf[record + layout::TIC_TIME_FIELD as usize..], scan.time_raw);
            BigEndian::write_i32(&mut buf[record + layout::TIC_TOTAL_FIELD as usize..], scan.total);

            BigEndian::write_i16(&mut buf[offset..], size);
            let mut pair = offset + layout::SCAN_HEADER_LEN as usize;
            for &(mass, code) in &scan.points {
                BigEndian::write_u16(&mut buf[pair..], mass);
                BigEndian::write_u16(&mut buf[pair + 2..], code);
                pair += layout::SCAN_POINT_LEN;
            }
        }

        if let Some(raw) = self.normalization {
            let at = TIC_START + n * layout::TIC_RECORD_LEN as usize;
            BigEndian::write_i32(&mut buf[at..], raw);
        }
        Ok(buf)
    }

    /// Write `DATA.MS` into `dir`, creating it if needed.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, SyntheticError> {
        let bytes = self.to_bytes()?;
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join("DATA.MS");
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Word address stored for a byte offset; inverse of [`layout::word_offset`].
pub fn word_address(offset: usize) -> i32 {
    ((offset + 2) / 2) as i32
}

/// Size word declaring `points` pairs; inverse of [`super::point_count`].
///
/// `None` when `points` exceeds [`MAX_SCAN_POINTS`].
pub fn size_word(points: usize) -> Option<i16> {
    points
        .checked_mul(2)
        .and_then(|n| n.checked_add(14))
        .and_then(|n| i16::try_from(n).ok())
}

fn text_capacity(field: HeaderField) -> usize {
    HEADER_LAYOUT
        .iter()
        .map(|f| f.offset)
        .find(|&offset| offset > field.offset)
        .map_or(0, |next| (next - field.offset - 1) as usize)
}

fn write_pascal(buf: &mut [u8], field: HeaderField, text: &str) {
    debug_assert_eq!(field.encoding, FieldEncoding::PascalString);
    let bytes = text.as_bytes();
    let len = bytes.len().min(text_capacity(field)).min(u8::MAX as usize);
    let start = field.offset as usize;
    buf[start] = len as u8;
    buf[start + 1..start + 1 + len].copy_from_slice(&bytes[..len]);
}
