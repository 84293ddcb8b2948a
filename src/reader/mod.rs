#![doc = r#"
A position-tracking cursor over a byte source

Every field of a SPLICE frame is read through a [`Reader`], one field at a
time, with an explicit width check. A short read is always reported as an
error naming the field; it is never zero-filled.

The frame body is read through a *bounded* reader (see [`Reader::bounded`]),
which wraps the source in [`std::io::Take`]. Once the declared payload length
is used up it reports a clean end of input, even if the underlying source has
trailing bytes.
"#]

mod error;
pub use error::*;

use std::io::{self, Read, Take};

/// Reads big and little endian fields from an [`io::Read`] source.
pub struct Reader<R> {
    inner: R,
    position: u64,
}

impl<'a> Reader<&'a [u8]> {
    /// Read from a byte slice
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<R> Reader<R> {
    /// Create a new reader over the source, starting at position `0`.
    pub const fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Returns the number of bytes consumed so far.
    pub const fn buffer_position(&self) -> u64 {
        self.position
    }

    /// Returns the wrapped source.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Reader<R> {
    /// Restrict this reader to at most `limit` further bytes.
    ///
    /// Reads past the limit observe end of input, and the underlying source
    /// is never touched beyond it.
    pub fn bounded(self, limit: u64) -> Reader<Take<R>> {
        Reader {
            inner: self.inner.take(limit),
            position: self.position,
        }
    }

    /// Fill as much of `buf` as the source allows.
    ///
    /// Returns the number of bytes read, which is less than `buf.len()`
    /// only if the source ran dry.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.position += filled as u64;
                    return Err(e);
                }
            }
        }
        self.position += filled as u64;
        Ok(filled)
    }

    /// Read exactly `N` bytes for `field`.
    pub fn read_exact_size<const N: usize>(&mut self, field: Field) -> ReadResult<[u8; N]> {
        let start = self.position;
        let mut buf = [0; N];
        let found = self.fill(&mut buf).map_err(|e| ReaderError::io(start, e))?;
        if found < N {
            return Err(ReaderError::truncated(start, field, N as u64, found as u64));
        }
        Ok(buf)
    }

    /// Read a single byte, or `None` if the source is exhausted.
    ///
    /// This is the only read where running out of input is not an error.
    pub fn try_read_u8(&mut self) -> ReadResult<Option<u8>> {
        let start = self.position;
        let mut buf = [0; 1];
        match self.fill(&mut buf).map_err(|e| ReaderError::io(start, e))? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }

    /// Read a single byte.
    pub fn read_u8(&mut self, field: Field) -> ReadResult<u8> {
        self.read_exact_size::<1>(field).map(|[b]| b)
    }

    /// Read a big-endian `u32`.
    pub fn read_u32_be(&mut self, field: Field) -> ReadResult<u32> {
        self.read_exact_size(field).map(u32::from_be_bytes)
    }

    /// Read a big-endian `u64`.
    pub fn read_u64_be(&mut self, field: Field) -> ReadResult<u64> {
        self.read_exact_size(field).map(u64::from_be_bytes)
    }

    /// Read a little-endian IEEE-754 `f32`.
    pub fn read_f32_le(&mut self, field: Field) -> ReadResult<f32> {
        self.read_exact_size(field).map(f32::from_le_bytes)
    }

    /// Read exactly `len` bytes for `field`.
    ///
    /// The buffer grows with the bytes that actually arrive, so a huge `len`
    /// from a corrupt record cannot force a huge allocation.
    pub fn read_bytes(&mut self, len: u64, field: Field) -> ReadResult<Vec<u8>> {
        let start = self.position;
        let mut buf = Vec::new();
        let found = self
            .inner
            .by_ref()
            .take(len)
            .read_to_end(&mut buf)
            .map_err(|e| ReaderError::io(start, e))?;
        self.position += found as u64;
        if (found as u64) < len {
            return Err(ReaderError::truncated(start, field, len, found as u64));
        }
        Ok(buf)
    }
}

impl<R> Reader<Take<R>> {
    /// Bytes left before the bound is reached.
    pub fn remaining(&self) -> u64 {
        self.inner.limit()
    }
}

#[test]
fn reads_mixed_endian_fields() {
    use pretty_assertions::assert_eq;
    let bytes = [
        0x00, 0x00, 0x00, 0x04, // u32 be
        0x00, 0x00, 0xF0, 0x42, // f32 le (120.0)
        0x07,
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(reader.read_u32_be(Field::NameLength).unwrap(), 4);
    assert_eq!(reader.read_f32_le(Field::Tempo).unwrap(), 120.0);
    assert_eq!(reader.read_u8(Field::TrackId).unwrap(), 7);
    assert_eq!(reader.buffer_position(), 9);
    assert!(reader.try_read_u8().unwrap().is_none());
}

#[test]
fn short_read_reports_field_and_counts() {
    let bytes = [0x01, 0x02];
    let mut reader = Reader::from_byte_slice(&bytes);
    let err = reader.read_u32_be(Field::NameLength).unwrap_err();
    assert_eq!(err.position(), 0);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::TruncatedRecord {
            field: Field::NameLength,
            expected: 4,
            found: 2,
        }
    ));
}

#[test]
fn bounded_reader_stops_at_limit() {
    use pretty_assertions::assert_eq;
    let bytes = [1, 2, 3, 4, 5, 6];
    let mut reader = Reader::from_byte_slice(&bytes);
    reader.read_u8(Field::TrackId).unwrap();

    let mut bounded = reader.bounded(3);
    assert_eq!(bounded.remaining(), 3);
    assert_eq!(bounded.read_bytes(2, Field::TrackName).unwrap(), [2, 3]);
    assert_eq!(bounded.try_read_u8().unwrap(), Some(4));
    assert_eq!(bounded.try_read_u8().unwrap(), None);
    assert_eq!(bounded.buffer_position(), 4);

    // the trailing bytes are still in the source, untouched
    assert_eq!(bounded.into_inner().into_inner(), [5, 6]);
}

#[test]
fn oversized_length_is_truncation_not_allocation() {
    let bytes = [b'a', b'b'];
    let mut reader = Reader::from_byte_slice(&bytes);
    let err = reader.read_bytes(u64::from(u32::MAX), Field::TrackName).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::TruncatedRecord {
            field: Field::TrackName,
            found: 2,
            ..
        }
    ));
}
