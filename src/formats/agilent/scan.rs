//! Per-scan mass/intensity decoding.
//!
//! A scan record starts with a signed 16-bit size word followed by 16 bytes
//! of scan metadata. The mass/intensity pairs begin 18 bytes in; each pair is
//! a `u16` mass code and a `u16` packed intensity code.

use std::io::{Read, Seek};

use super::layout;
use super::primitive;
use super::source::BinarySource;
use super::AgilentError;

const MANTISSA_MASK: u16 = 0x3FFF;
const EXPONENT_SHIFT: u16 = 14;

/// Decoded (mass, intensity) pairs of one scan, in record order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanRecord {
    /// Decoded masses
    pub masses: Vec<f64>,
    /// Decoded intensities
    pub intensities: Vec<f64>,
}

impl ScanRecord {
    /// Number of decoded points
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Whether the scan recorded no points
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }
}

/// Number of mass/intensity pairs declared by a scan's size word.
///
/// Floor division on the signed size; records too small to hold a pair
/// yield zero.
pub fn point_count(size: i16) -> usize {
    let n = (i32::from(size) - layout::SCAN_HEADER_LEN as i32).div_euclid(2) + 2;
    n.max(0) as usize
}

/// Decode a raw mass code.
///
/// Computes `round(raw / 20 * 10^precision) / precision`, rounding half to
/// even. The divisor is `precision`, not `10^precision`, which looks like a
/// defect in the historical decoder; it is kept so output matches data
/// decoded by earlier tools.
// TODO: confirm against vendor m/z output whether the divisor should be 10^precision
pub fn decode_mass(raw: u16, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (f64::from(raw) / 20.0 * scale).round_ties_even() / f64::from(precision)
}

/// Decode a packed intensity code.
///
/// The low 14 bits are the mantissa and the top two bits a base-8 exponent:
/// `(raw & 0x3FFF) * 8^(raw >> 14)`.
pub fn decode_intensity(raw: u16) -> f64 {
    let mantissa = f64::from(raw & MANTISSA_MASK);
    let exponent = i32::from(raw >> EXPONENT_SHIFT);
    mantissa * 8f64.powi(exponent)
}

/// Read the raw pair region of one scan.
pub(crate) fn read_scan_region<R: Read + Seek>(
    source: &mut BinarySource<R>,
    offset: u64,
    scan: usize,
) -> Result<Vec<u8>, AgilentError> {
    let size = source.i16_at(offset, &format!("scan {} size", scan))?;
    let n = point_count(size);
    source.read_at(
        offset + layout::SCAN_HEADER_LEN,
        n * layout::SCAN_POINT_LEN,
        &format!("scan {} points", scan),
    )
}

/// Decode a pair region read by [`read_scan_region`].
pub fn decode_scan_region(bytes: &[u8], precision: u32) -> Result<ScanRecord, AgilentError> {
    let pairs = bytes.chunks_exact(layout::SCAN_POINT_LEN);
    if !pairs.remainder().is_empty() {
        return Err(AgilentError::ShortBuffer {
            expected: layout::SCAN_POINT_LEN,
            actual: pairs.remainder().len(),
        });
    }

    let mut record = ScanRecord {
        masses: Vec::with_capacity(pairs.len()),
        intensities: Vec::with_capacity(pairs.len()),
    };
    for pair in pairs {
        let mass = primitive::uint16(&pair[..2])?;
        let code = primitive::uint16(&pair[2..])?;
        record.masses.push(decode_mass(mass, precision));
        record.intensities.push(decode_intensity(code));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_intensity_packed() {
        assert_eq!(decode_intensity(0x4005), 40.0);
        assert_eq!(decode_intensity(0x0010), 16.0);
        assert_eq!(decode_intensity(0x8001), 64.0);
        assert_eq!(decode_intensity(0xFFFF), 16383.0 * 512.0);
        assert_eq!(decode_intensity(0), 0.0);
    }

    #[test]
    fn test_decode_mass_keeps_precision_divisor() {
        // 1000 / 20 * 1000 = 50000, then / 3
        assert_eq!(decode_mass(1000, 3), 50000.0 / 3.0);
        assert_eq!(decode_mass(1200, 3), 20000.0);
        assert_eq!(decode_mass(0, 3), 0.0);
        assert_eq!(decode_mass(1001, 1), 500.0);
    }

    #[test]
    fn test_point_count() {
        assert_eq!(point_count(18), 2);
        assert_eq!(point_count(22), 4);
        assert_eq!(point_count(23), 4);
        assert_eq!(point_count(16), 1);
        assert_eq!(point_count(14), 0);
        assert_eq!(point_count(-40), 0);
    }

    #[test]
    fn test_decode_region() {
        let bytes = [0x03, 0xE8, 0x40, 0x05, 0x04, 0xB0, 0x00, 0x10];
        let record = decode_scan_region(&bytes, 3).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.masses, vec![decode_mass(1000, 3), decode_mass(1200, 3)]);
        assert_eq!(record.intensities, vec![40.0, 16.0]);
    }

    #[test]
    fn test_decode_region_partial_pair() {
        let bytes = [0x03, 0xE8, 0x40];
        assert!(matches!(
            decode_scan_region(&bytes, 3),
            Err(AgilentError::ShortBuffer { .. })
        ));
    }
}
