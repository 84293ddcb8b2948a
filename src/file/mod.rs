#![doc = r#"
Rusty representation of a SPLICE [`Pattern`]

# Layout

```text
offset  size  field
0       6     magic literal "SPLICE"
6       8     payload length (u64, big-endian)
14      32    version (NUL padded)
46      4     tempo (f32, little-endian)
50      ...   track records until the payload length is used up
```

Everything after the length field counts against the payload length, so the
track records are read until the frame, not the stream, runs out. Bytes past
the frame are never read.
"#]

mod header;
pub use header::*;

mod steps;
pub use steps::*;

mod track;
pub use track::*;

use crate::reader::{Field, ReadResult, Reader, ReaderError, ReaderErrorKind};
use core::fmt;
use std::io::Read;

#[doc = r#"
A decoded drum pattern

Built once by [`Pattern::decode`] and never changed afterwards.

# Example
```rust
# use splice::prelude::*;
let mut bytes = Vec::new();
bytes.extend_from_slice(MAGIC);
bytes.extend_from_slice(&36u64.to_be_bytes());
let mut version = [0u8; VERSION_LEN];
version[..11].copy_from_slice(b"0.808-alpha");
bytes.extend_from_slice(&version);
bytes.extend_from_slice(&120f32.to_le_bytes());

let pattern = Pattern::parse(&bytes).unwrap();
assert_eq!(pattern.version(), "0.808-alpha");
assert_eq!(pattern.tempo(), 120.);
assert!(pattern.tracks().is_empty());
```
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    version: String,
    tempo: f32,
    tracks: Vec<Track>,
    payload_len: u64,
}

impl Pattern {
    /// Decode a pattern from a byte stream.
    ///
    /// The stream is read no further than the frame's declared length.
    pub fn decode<R: Read>(source: R) -> ReadResult<Self> {
        let mut reader = Reader::new(source);
        let header = FrameHeader::read(&mut reader)?;

        #[cfg(feature = "tracing")]
        if header.payload_len() < (VERSION_LEN + TEMPO_LEN) as u64 {
            tracing::warn!(
                payload_len = header.payload_len(),
                "declared payload length cannot hold a version and tempo"
            );
        }

        let mut body = reader.bounded(header.body_len());
        let tempo = body.read_f32_le(Field::Tempo).map_err(|e| {
            let position = e.position();
            match e.into_kind() {
                ReaderErrorKind::TruncatedRecord {
                    expected, found, ..
                } => ReaderError::malformed(
                    position,
                    Field::Tempo,
                    crate::FieldError::Short { expected, found },
                ),
                kind => ReaderError::new(position, kind),
            }
        })?;

        let tracks = Tracks::new(&mut body).collect::<ReadResult<Vec<_>>>()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            tracks = tracks.len(),
            position = body.buffer_position(),
            "decoded SPLICE pattern"
        );

        let payload_len = header.payload_len();
        Ok(Self {
            version: header.into_version(),
            tempo,
            tracks,
            payload_len,
        })
    }

    /// Parse a pattern from a set of bytes
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        Self::decode(bytes)
    }

    /// The hardware version the pattern was saved with
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Beats per minute
    pub const fn tempo(&self) -> f32 {
        self.tempo
    }

    /// The tracks, in file order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Returns the first track with the given id.
    ///
    /// Ids are not unique; later duplicates are still present in [`Pattern::tracks`].
    pub fn track(&self, id: u8) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    /// The payload length declared by the frame header
    pub const fn payload_len(&self) -> u64 {
        self.payload_len
    }

    /// Consumes the pattern, returning its tracks.
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved with HW Version: {}", self.version)?;
        writeln!(f, "Tempo: {}", self.tempo)?;
        for track in &self.tracks {
            writeln!(f, "{track}")?;
        }
        Ok(())
    }
}

#[test]
fn tempo_is_little_endian() {
    use pretty_assertions::assert_eq;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&36u64.to_be_bytes());
    bytes.extend_from_slice(&[0; VERSION_LEN]);
    bytes.extend_from_slice(&[0x66, 0x66, 0xC4, 0x42]);

    let pattern = Pattern::parse(&bytes).unwrap();
    assert_eq!(pattern.tempo(), 98.2);
    assert_eq!(pattern.version(), "");
    assert_eq!(pattern.to_string(), "Saved with HW Version: \nTempo: 98.2\n");
}

#[test]
fn short_tempo_is_malformed() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&34u64.to_be_bytes());
    bytes.extend_from_slice(&[0; VERSION_LEN]);
    bytes.extend_from_slice(&120f32.to_le_bytes());

    let err = Pattern::parse(&bytes).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::MalformedField {
            field: Field::Tempo,
            reason: crate::FieldError::Short {
                expected: 4,
                found: 2
            },
        }
    ));
}
