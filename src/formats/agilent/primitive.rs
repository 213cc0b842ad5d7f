//! Fixed-width big-endian integer decoding.
//!
//! Every multi-byte value in a ChemStation MS file is big-endian. These
//! functions take the leading `width` bytes of a buffer and fail with
//! [`AgilentError::ShortBuffer`] when fewer are available.

use byteorder::{BigEndian, ByteOrder};

use super::AgilentError;

fn require(bytes: &[u8], width: usize) -> Result<&[u8], AgilentError> {
    if bytes.len() < width {
        return Err(AgilentError::ShortBuffer {
            expected: width,
            actual: bytes.len(),
        });
    }
    Ok(&bytes[..width])
}

/// Decode an unsigned 8-bit value.
pub fn uint8(bytes: &[u8]) -> Result<u8, AgilentError> {
    Ok(require(bytes, 1)?[0])
}

/// Decode a big-endian unsigned 16-bit value.
pub fn uint16(bytes: &[u8]) -> Result<u16, AgilentError> {
    Ok(BigEndian::read_u16(require(bytes, 2)?))
}

/// Decode a big-endian unsigned 32-bit value.
pub fn uint32(bytes: &[u8]) -> Result<u32, AgilentError> {
    Ok(BigEndian::read_u32(require(bytes, 4)?))
}

/// Decode a big-endian signed 16-bit value.
pub fn int16(bytes: &[u8]) -> Result<i16, AgilentError> {
    Ok(BigEndian::read_i16(require(bytes, 2)?))
}

/// Decode a big-endian signed 32-bit value.
pub fn int32(bytes: &[u8]) -> Result<i32, AgilentError> {
    Ok(BigEndian::read_i32(require(bytes, 4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_widths() {
        let bytes = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(uint8(&bytes).unwrap(), 0x12);
        assert_eq!(uint16(&bytes).unwrap(), 0x1234);
        assert_eq!(uint32(&bytes).unwrap(), 0x1234_5678);
    }

    #[test]
    fn test_signed_values() {
        assert_eq!(int16(&[0xFF, 0xFE]).unwrap(), -2);
        assert_eq!(int32(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap(), -1);
        assert_eq!(int32(&[0x01, 0x12, 0xA8, 0x80]).unwrap(), 18_000_000);
    }

    #[test]
    fn test_extra_bytes_ignored() {
        assert_eq!(uint16(&[0x00, 0x10, 0xFF]).unwrap(), 16);
    }

    #[test]
    fn test_short_buffer() {
        let err = uint32(&[0x00, 0x01]).unwrap_err();
        assert!(matches!(
            err,
            AgilentError::ShortBuffer {
                expected: 4,
                actual: 2
            }
        ));
        assert!(uint8(&[]).is_err());
    }
}
