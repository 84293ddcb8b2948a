use crate::reader::{Field, ReadResult, Reader, ReaderError};
use std::io::Read;

/// The marker every SPLICE stream starts with.
pub const MAGIC: &[u8; 6] = b"SPLICE";

/// Width of the NUL padded version field.
pub const VERSION_LEN: usize = 32;

/// Width of the little-endian tempo field.
pub const TEMPO_LEN: usize = 4;

#[doc = r#"
The validated header of a SPLICE frame

```text
offset  size  field
0       6     magic "SPLICE"
6       8     payload length (u64, big-endian)
14      32    version (NUL padded)
```

The payload length counts every byte after the length field itself: the
version, the tempo and all track records.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    payload_len: u64,
    version: String,
}

impl FrameHeader {
    /// Create a header from its parts
    pub fn new(payload_len: u64, version: impl Into<String>) -> Self {
        Self {
            payload_len,
            version: version.into(),
        }
    }

    /// Reads the magic marker, payload length and version.
    ///
    /// Any failure to read these fields, short or otherwise, means this is
    /// not a stream we understand and yields `NotSplice`.
    pub(crate) fn read<R: Read>(reader: &mut Reader<R>) -> ReadResult<Self> {
        let not_splice = |_: ReaderError| ReaderError::not_splice(0);

        let magic: [u8; 6] = reader.read_exact_size(Field::Magic).map_err(not_splice)?;
        if &magic != MAGIC {
            return Err(ReaderError::not_splice(0));
        }
        let payload_len = reader
            .read_u64_be(Field::PayloadLength)
            .map_err(not_splice)?;

        let position = reader.buffer_position();
        let raw: [u8; VERSION_LEN] = reader.read_exact_size(Field::Version).map_err(not_splice)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(VERSION_LEN);
        let version = core::str::from_utf8(&raw[..end])
            .map_err(|e| ReaderError::malformed(position, Field::Version, e))?
            .to_owned();

        #[cfg(feature = "tracing")]
        tracing::debug!(payload_len, version = %version, "read SPLICE header");

        Ok(Self {
            payload_len,
            version,
        })
    }

    /// The payload length declared by the frame
    pub const fn payload_len(&self) -> u64 {
        self.payload_len
    }

    /// The hardware version the pattern was saved with
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Bytes of the payload that follow the version field.
    ///
    /// This is the tempo plus every track record. A declared length shorter
    /// than the version field leaves nothing to read.
    pub const fn body_len(&self) -> u64 {
        self.payload_len.saturating_sub(VERSION_LEN as u64)
    }

    pub(crate) fn into_version(self) -> String {
        self.version
    }
}

#[test]
fn version_stops_at_first_nul() {
    use pretty_assertions::assert_eq;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&40u64.to_be_bytes());
    let mut version = [0u8; VERSION_LEN];
    version[..11].copy_from_slice(b"0.808-alpha");
    version[12] = b'z';
    bytes.extend_from_slice(&version);

    let header = FrameHeader::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(header.version(), "0.808-alpha");
    assert_eq!(header.payload_len(), 40);
    assert_eq!(header.body_len(), 8);
}

#[test]
fn version_without_nul_uses_whole_field() {
    use pretty_assertions::assert_eq;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&36u64.to_be_bytes());
    bytes.extend_from_slice(&[b'v'; VERSION_LEN]);

    let header = FrameHeader::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(header.version().len(), VERSION_LEN);
}

#[test]
fn short_header_is_not_splice() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&36u64.to_be_bytes());
    bytes.extend_from_slice(b"0.808");

    let err = FrameHeader::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert!(err.is_not_splice());
}

#[test]
fn tiny_payload_has_empty_body() {
    use pretty_assertions::assert_eq;
    assert_eq!(FrameHeader::new(3, "").body_len(), 0);
}
