//! Offset-addressed reads over a seekable byte source.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use super::primitive;
use super::AgilentError;

/// Random-access view of an MS file that reports reads past the end as
/// [`AgilentError::Truncated`].
pub(crate) struct BinarySource<R> {
    inner: R,
    label: String,
    len: u64,
}

impl<R: Read + Seek> BinarySource<R> {
    pub(crate) fn new(mut inner: R, label: impl Into<String>) -> Result<Self, AgilentError> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self {
            inner,
            label: label.into(),
            len,
        })
    }

    /// Total length of the source in bytes.
    pub(crate) fn len(&self) -> u64 {
        self.len
    }

    /// Name used in error messages.
    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// Read exactly `len` bytes starting at `offset`.
    pub(crate) fn read_at(
        &mut self,
        offset: u64,
        len: usize,
        context: &str,
    ) -> Result<Vec<u8>, AgilentError> {
        let truncated = || AgilentError::Truncated {
            offset,
            context: context.to_string(),
        };
        match offset.checked_add(len as u64) {
            Some(end) if end <= self.len => {}
            _ => return Err(truncated()),
        }

        self.inner.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => truncated(),
            _ => AgilentError::IoError(e),
        })?;
        Ok(buf)
    }

    /// Read `len` bytes at `offset` if that many remain, `None` otherwise.
    pub(crate) fn try_read_at(
        &mut self,
        offset: u64,
        len: usize,
    ) -> Result<Option<Vec<u8>>, AgilentError> {
        if offset.saturating_add(len as u64) > self.len {
            return Ok(None);
        }
        self.read_at(offset, len, "optional field").map(Some)
    }

    pub(crate) fn u8_at(&mut self, offset: u64, context: &str) -> Result<u8, AgilentError> {
        primitive::uint8(&self.read_at(offset, 1, context)?)
    }

    pub(crate) fn u32_at(&mut self, offset: u64, context: &str) -> Result<u32, AgilentError> {
        primitive::uint32(&self.read_at(offset, 4, context)?)
    }

    pub(crate) fn i16_at(&mut self, offset: u64, context: &str) -> Result<i16, AgilentError> {
        primitive::int16(&self.read_at(offset, 2, context)?)
    }

    pub(crate) fn i32_at(&mut self, offset: u64, context: &str) -> Result<i32, AgilentError> {
        primitive::int32(&self.read_at(offset, 4, context)?)
    }

    /// Read a length-prefixed string and trim surrounding whitespace.
    pub(crate) fn pascal_string_at(
        &mut self,
        offset: u64,
        context: &str,
    ) -> Result<String, AgilentError> {
        let len = self.u8_at(offset, context)?;
        let bytes = self.read_at(offset + 1, usize::from(len), context)?;
        Ok(String::from_utf8_lossy(&bytes).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_at_bounds() {
        let mut source = BinarySource::new(Cursor::new(vec![1u8, 2, 3, 4]), "mem").unwrap();
        assert_eq!(source.len(), 4);
        assert_eq!(source.read_at(1, 3, "tail").unwrap(), vec![2, 3, 4]);

        let err = source.read_at(2, 3, "tail").unwrap_err();
        assert!(matches!(err, AgilentError::Truncated { offset: 2, .. }));
        assert!(source.read_at(u64::MAX, 1, "overflow").is_err());
    }

    #[test]
    fn test_try_read_at() {
        let mut source = BinarySource::new(Cursor::new(vec![0u8; 6]), "mem").unwrap();
        assert!(source.try_read_at(2, 4).unwrap().is_some());
        assert!(source.try_read_at(3, 4).unwrap().is_none());
    }

    #[test]
    fn test_pascal_string() {
        let mut data = vec![0u8; 4];
        data.push(7);
        data.extend_from_slice(b" C12 a ");
        let mut source = BinarySource::new(Cursor::new(data), "mem").unwrap();
        assert_eq!(source.pascal_string_at(4, "name").unwrap(), "C12 a");
        assert_eq!(source.pascal_string_at(0, "empty").unwrap(), "");
    }
}
