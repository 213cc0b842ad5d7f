//! Header parsing: acquisition metadata and layout offsets.

use std::fmt;
use std::io::{Read, Seek};

use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::layout::{self, HeaderField};
use super::source::BinarySource;
use super::AgilentError;

/// Date formats tried in order, after whitespace runs are collapsed.
const DATE_FORMATS: [&str; 3] = [
    "%d %b %y %I:%M %p",
    "%d/%b/%y %I:%M:%S %p",
    "%d-%b-%y, %H:%M:%S",
];

/// Sample description block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleInfo {
    /// Sample name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Position in the acquisition sequence
    pub sequence: i16,
    /// Autosampler vial
    pub vial: i16,
    /// Replicate number
    pub replicate: i16,
}

/// Acquisition method block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodInfo {
    /// Method name
    pub name: String,
    /// Operator
    pub operator: String,
    /// Acquisition date
    pub date: AcquisitionDate,
}

/// Instrument block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentInfo {
    /// Instrument name
    pub name: String,
    /// Inlet
    pub inlet: String,
}

/// Acquisition date: parsed when the text matches a known format, raw otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionDate {
    /// Text matched one of the known formats
    Parsed(NaiveDateTime),
    /// Text kept verbatim
    Raw(String),
}

impl Default for AcquisitionDate {
    fn default() -> Self {
        AcquisitionDate::Raw(String::new())
    }
}

impl AcquisitionDate {
    /// Parse date text, falling back to the raw string.
    pub fn parse(text: &str) -> Self {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
            .map(AcquisitionDate::Parsed)
            .unwrap_or_else(|| AcquisitionDate::Raw(text.to_string()))
    }

    /// The parsed date-time, if any.
    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            AcquisitionDate::Parsed(dt) => Some(dt),
            AcquisitionDate::Raw(_) => None,
        }
    }
}

impl fmt::Display for AcquisitionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionDate::Parsed(dt) => write!(f, "{}", dt),
            AcquisitionDate::Raw(s) => write!(f, "{}", s),
        }
    }
}

/// Byte offsets locating the variable-length regions of the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutOffsets {
    /// Start of the TIC directory
    pub tic: u64,
    /// Start of each scan record, in scan order
    pub xic: Vec<u64>,
    /// Normalization block, when present
    pub normalization: Option<i64>,
}

/// Decoded file header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileHeader {
    /// Sample block
    pub sample: SampleInfo,
    /// Method block
    pub method: MethodInfo,
    /// Instrument block
    pub instrument: InstrumentInfo,
    /// Number of scans
    pub scan_count: usize,
    /// Region offsets
    pub offsets: LayoutOffsets,
    /// Mass rounding precision (decimal places)
    pub precision: u32,
}

impl FileHeader {
    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SampleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sample:")?;
        writeln!(f, "  Name: {}", self.name)?;
        writeln!(f, "  Description: {}", self.description)?;
        writeln!(f, "  Sequence: {}", self.sequence)?;
        writeln!(f, "  Vial: {}", self.vial)?;
        writeln!(f, "  Replicate: {}", self.replicate)
    }
}

impl fmt::Display for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Method:")?;
        writeln!(f, "  Name: {}", self.name)?;
        writeln!(f, "  Operator: {}", self.operator)?;
        writeln!(f, "  Date: {}", self.date)
    }
}

impl fmt::Display for InstrumentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Instrument:")?;
        writeln!(f, "  Name: {}", self.name)?;
        writeln!(f, "  Inlet: {}", self.inlet)
    }
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sample)?;
        write!(f, "{}", self.method)?;
        write!(f, "{}", self.instrument)?;
        writeln!(f, "Layout:")?;
        writeln!(f, "  Scans: {}", self.scan_count)?;
        writeln!(f, "  TIC offset: {}", self.offsets.tic)?;
        let preview: Vec<_> = self.offsets.xic.iter().take(10).collect();
        writeln!(f, "  XIC offsets: {:?}", preview)?;
        match self.offsets.normalization {
            Some(offset) => writeln!(f, "  Normalization offset: {}", offset),
            None => writeln!(f, "  Normalization offset: none"),
        }
    }
}

fn read_text<R: Read + Seek>(
    source: &mut BinarySource<R>,
    field: HeaderField,
) -> Result<String, AgilentError> {
    source.pascal_string_at(field.offset, field.name)
}

/// Parse the fixed header and the per-scan offset table.
pub(crate) fn parse_header<R: Read + Seek>(
    source: &mut BinarySource<R>,
    precision: u32,
) -> Result<FileHeader, AgilentError> {
    if source.len() < layout::HEADER_LEN {
        return Err(AgilentError::invalid_format(
            source.label(),
            format!(
                "file is {} bytes, header needs {}",
                source.len(),
                layout::HEADER_LEN
            ),
        ));
    }

    let triplet = layout::SEQUENCE_VIAL_REPLICATE;
    let sample = SampleInfo {
        name: read_text(source, layout::SAMPLE_NAME)?,
        description: read_text(source, layout::SAMPLE_DESCRIPTION)?,
        sequence: source.i16_at(triplet.offset, triplet.name)?,
        vial: source.i16_at(triplet.offset + 2, triplet.name)?,
        replicate: source.i16_at(triplet.offset + 4, triplet.name)?,
    };

    let date_text = read_text(source, layout::ACQUISITION_DATE)?;
    let date = AcquisitionDate::parse(&date_text);
    if date.as_datetime().is_none() && !date_text.is_empty() {
        warn!("Unrecognised acquisition date '{}', keeping raw text", date_text);
    }
    let method = MethodInfo {
        name: read_text(source, layout::METHOD_NAME)?,
        operator: read_text(source, layout::OPERATOR)?,
        date,
    };

    let instrument = InstrumentInfo {
        name: read_text(source, layout::INSTRUMENT_NAME)?,
        inlet: read_text(source, layout::INLET)?,
    };

    let scan_count = source.u32_at(layout::SCAN_COUNT.offset, layout::SCAN_COUNT.name)? as usize;

    let tic_raw = source.i32_at(layout::TIC_OFFSET.offset, layout::TIC_OFFSET.name)?;
    let tic = layout::word_offset(tic_raw);
    if tic < 0 {
        return Err(AgilentError::invalid_format(
            source.label(),
            format!("negative TIC offset {}", tic),
        ));
    }
    let tic = tic as u64;

    let mut xic = Vec::with_capacity(scan_count.min(1 << 20));
    let mut cursor = tic + layout::TIC_XIC_FIELD;
    for scan in 0..scan_count {
        let offset = layout::word_offset(source.i32_at(cursor, "scan offset table")?);
        if offset < 0 {
            return Err(AgilentError::invalid_format(
                source.label(),
                format!("negative offset {} for scan {}", offset, scan),
            ));
        }
        xic.push(offset as u64);
        cursor += layout::TIC_RECORD_LEN;
    }

    let normalization = source
        .try_read_at(cursor, 4)?
        .map(|bytes| super::primitive::int32(&bytes).map(layout::word_offset))
        .transpose()?;

    debug!(
        "Header: {} scans, TIC at {}, normalization {:?}",
        scan_count, tic, normalization
    );

    Ok(FileHeader {
        sample,
        method,
        instrument,
        scan_count,
        offsets: LayoutOffsets {
            tic,
            xic,
            normalization,
        },
        precision,
    })
}
