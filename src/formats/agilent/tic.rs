//! TIC directory: retention times and recorded total intensities.

use std::io::{Read, Seek};

use super::header::FileHeader;
use super::layout;
use super::primitive;
use super::source::BinarySource;
use super::AgilentError;

/// Time axis and recorded total ion current, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicSeries {
    /// Retention times in minutes
    pub time_list: Vec<f64>,
    /// Total ion current per scan
    pub intensities: Vec<f64>,
}

impl TicSeries {
    /// Number of scans in the series
    pub fn len(&self) -> usize {
        self.time_list.len()
    }

    /// Whether the series holds no scans
    pub fn is_empty(&self) -> bool {
        self.time_list.is_empty()
    }

    /// Whether retention times strictly increase
    pub fn is_strictly_ascending(&self) -> bool {
        self.time_list.windows(2).all(|w| w[0] < w[1])
    }
}

/// Read the TIC directory located by the header.
pub(crate) fn read_tic<R: Read + Seek>(
    source: &mut BinarySource<R>,
    header: &FileHeader,
) -> Result<TicSeries, AgilentError> {
    let scans = header.scan_count;
    if scans == 0 {
        return Ok(TicSeries::default());
    }

    // The last record only needs its time and total fields.
    let region_len = (scans as u64 - 1) * layout::TIC_RECORD_LEN + layout::TIC_TOTAL_FIELD + 4;
    let region_len = usize::try_from(region_len).map_err(|_| {
        AgilentError::invalid_format(source.label(), format!("TIC region for {} scans", scans))
    })?;
    let region = source.read_at(header.offsets.tic, region_len, "TIC directory")?;

    let mut series = TicSeries {
        time_list: Vec::with_capacity(scans),
        intensities: Vec::with_capacity(scans),
    };
    for record in 0..scans {
        let base = record * layout::TIC_RECORD_LEN as usize;
        let time = primitive::int32(&region[base + layout::TIC_TIME_FIELD as usize..])?;
        let total = primitive::int32(&region[base + layout::TIC_TOTAL_FIELD as usize..])?;
        series.time_list.push(f64::from(time) / layout::TIME_SCALE);
        series.intensities.push(f64::from(total));
    }

    Ok(series)
}
