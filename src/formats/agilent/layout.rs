//! On-disk layout of a ChemStation MS file.
//!
//! The format is undocumented; the offsets below were reverse-engineered and
//! must be reproduced exactly. The header is described as a table of
//! (field, offset, encoding) entries so the layout stays auditable in one
//! place.
//!
//! ```text
//! 0         24   86   148   178   208  218  228   252     260      278
//! | ....... |name|desc|oper |date |inst|inlt|meth |seq/vial|tic_raw | scans |
//!
//! tic_offset = 2 * tic_raw - 2
//! tic_offset: [xic_raw i32][time i32][total i32]  x scans   (12-byte records)
//!             [normalization_raw i32]                         (optional)
//! xic_offset: [size i16][16 bytes][mz u16][code u16] x n
//! ```

/// How a header field is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEncoding {
    /// One length byte followed by that many bytes of text
    PascalString,
    /// Three consecutive big-endian `i16` values
    Int16Triplet,
    /// Big-endian `u32`
    UInt32,
    /// Big-endian `i32` word address; the byte offset is `2 * raw - 2`
    WordOffset,
}

/// A fixed-position header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderField {
    /// Field name
    pub name: &'static str,
    /// Absolute byte offset
    pub offset: u64,
    /// Storage encoding
    pub encoding: FieldEncoding,
}

impl HeaderField {
    const fn new(name: &'static str, offset: u64, encoding: FieldEncoding) -> Self {
        Self {
            name,
            offset,
            encoding,
        }
    }
}

/// Sample name
pub const SAMPLE_NAME: HeaderField = HeaderField::new("sample name", 24, FieldEncoding::PascalString);
/// Sample description
pub const SAMPLE_DESCRIPTION: HeaderField =
    HeaderField::new("description", 86, FieldEncoding::PascalString);
/// Sequence, vial and replicate numbers
pub const SEQUENCE_VIAL_REPLICATE: HeaderField =
    HeaderField::new("sequence/vial/replicate", 252, FieldEncoding::Int16Triplet);
/// Method name
pub const METHOD_NAME: HeaderField = HeaderField::new("method name", 228, FieldEncoding::PascalString);
/// Operator
pub const OPERATOR: HeaderField = HeaderField::new("operator", 148, FieldEncoding::PascalString);
/// Acquisition date text
pub const ACQUISITION_DATE: HeaderField =
    HeaderField::new("acquisition date", 178, FieldEncoding::PascalString);
/// Instrument name
pub const INSTRUMENT_NAME: HeaderField =
    HeaderField::new("instrument name", 208, FieldEncoding::PascalString);
/// Inlet
pub const INLET: HeaderField = HeaderField::new("inlet", 218, FieldEncoding::PascalString);
/// Number of scans
pub const SCAN_COUNT: HeaderField = HeaderField::new("scan count", 278, FieldEncoding::UInt32);
/// Word address of the TIC directory
pub const TIC_OFFSET: HeaderField = HeaderField::new("TIC offset", 260, FieldEncoding::WordOffset);

/// The complete fixed header, in file-offset order.
pub const HEADER_LAYOUT: [HeaderField; 10] = [
    SAMPLE_NAME,
    SAMPLE_DESCRIPTION,
    OPERATOR,
    ACQUISITION_DATE,
    INSTRUMENT_NAME,
    INLET,
    METHOD_NAME,
    SEQUENCE_VIAL_REPLICATE,
    TIC_OFFSET,
    SCAN_COUNT,
];

/// Smallest file that can hold the fixed header.
pub const HEADER_LEN: u64 = 282;

/// Size of one TIC directory record.
pub const TIC_RECORD_LEN: u64 = 12;
/// Position of the scan's record offset within a TIC directory record.
pub const TIC_XIC_FIELD: u64 = 0;
/// Position of the retention time within a TIC directory record.
pub const TIC_TIME_FIELD: u64 = 4;
/// Position of the total intensity within a TIC directory record.
pub const TIC_TOTAL_FIELD: u64 = 8;

/// Raw time units per minute.
pub const TIME_SCALE: f64 = 60000.0;

/// Bytes preceding the first mass/intensity pair of a scan record.
pub const SCAN_HEADER_LEN: u64 = 18;
/// Bytes per mass/intensity pair.
pub const SCAN_POINT_LEN: usize = 4;

/// Default number of decimal places masses are rounded to.
pub const DEFAULT_PRECISION: u32 = 3;

/// Convert a stored word address into a byte offset.
pub fn word_offset(raw: i32) -> i64 {
    2 * i64::from(raw) - 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fits_header() {
        for field in HEADER_LAYOUT {
            let width = match field.encoding {
                FieldEncoding::PascalString => 1,
                FieldEncoding::Int16Triplet => 6,
                FieldEncoding::UInt32 | FieldEncoding::WordOffset => 4,
            };
            assert!(field.offset + width <= HEADER_LEN, "{} overflows header", field.name);
        }
    }

    #[test]
    fn test_layout_sorted_by_offset() {
        assert!(HEADER_LAYOUT.windows(2).all(|w| w[0].offset < w[1].offset));
    }

    #[test]
    fn test_word_offset() {
        assert_eq!(word_offset(1), 0);
        assert_eq!(word_offset(0), -2);
        assert_eq!(word_offset(257), 512);
    }
}
