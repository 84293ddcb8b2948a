use super::{STEPS_PER_TRACK, Steps};
use crate::reader::{Field, ReadResult, Reader, ReaderError};
use core::fmt;
use std::io::Read;

#[doc = r#"
One instrument lane of a [`Pattern`](crate::prelude::Pattern)

A track record is laid out as

```text
size  field
1     id (u8)
4     name length N (u32, big-endian)
N     name (UTF-8, not NUL terminated)
16    steps (one byte each, non-zero is on)
```
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    id: u8,
    name: String,
    steps: Steps,
}

impl Track {
    /// Create a new track
    pub fn new(id: u8, name: impl Into<String>, steps: impl Into<Steps>) -> Self {
        Self {
            id,
            name: name.into(),
            steps: steps.into(),
        }
    }

    /// Reads the next track record.
    ///
    /// Returns `Ok(None)` when the reader is exhausted before the record's
    /// first byte. Running out anywhere later in the record is an error.
    pub(crate) fn read<R: Read>(reader: &mut Reader<R>) -> ReadResult<Option<Self>> {
        let Some(id) = reader.try_read_u8()? else {
            return Ok(None);
        };
        let name_len = reader.read_u32_be(Field::NameLength)?;

        let position = reader.buffer_position();
        let name = reader.read_bytes(u64::from(name_len), Field::TrackName)?;
        let name = String::from_utf8(name)
            .map_err(|e| ReaderError::malformed(position, Field::TrackName, e.utf8_error()))?;

        let steps: [u8; STEPS_PER_TRACK] = reader.read_exact_size(Field::Steps)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(id, name = %name, position, "read track");

        Ok(Some(Self {
            id,
            name,
            steps: Steps::from_bytes(steps),
        }))
    }

    /// The track's identifier
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// The instrument name, possibly empty
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The track's sixteen steps
    pub const fn steps(&self) -> &Steps {
        &self.steps
    }
}

/// Renders as `(id) name\t|x---|x---|x---|x---|`
impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}\t{}", self.id, self.name, self.steps)
    }
}

#[doc = r#"
An iterator over the track records left in a reader

Yields tracks until the reader reports end of input at a record boundary.
After the first error it yields nothing more.
"#]
pub struct Tracks<'r, R> {
    reader: &'r mut Reader<R>,
    done: bool,
}

impl<'r, R: Read> Tracks<'r, R> {
    /// Iterate the records remaining in `reader`
    pub fn new(reader: &'r mut Reader<R>) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: Read> Iterator for Tracks<'_, R> {
    type Item = ReadResult<Track>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = Track::read(self.reader).transpose();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }
}

#[cfg(test)]
fn record(id: u8, name: &[u8], steps: [u8; STEPS_PER_TRACK]) -> Vec<u8> {
    let mut bytes = vec![id];
    bytes.extend_from_slice(&(name.len() as u32).to_be_bytes());
    bytes.extend_from_slice(name);
    bytes.extend_from_slice(&steps);
    bytes
}

#[test]
fn read_kick_record() {
    use pretty_assertions::assert_eq;
    let bytes = record(1, b"kick", [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0]);
    let mut reader = Reader::from_byte_slice(&bytes);

    let track = Track::read(&mut reader).unwrap().unwrap();
    assert_eq!(track.id(), 1);
    assert_eq!(track.name(), "kick");
    assert_eq!(track.to_string(), "(1) kick\t|x---|x---|x---|x---|");
    assert!(Track::read(&mut reader).unwrap().is_none());
}

#[test]
fn empty_name_is_valid() {
    use pretty_assertions::assert_eq;
    let bytes = record(255, b"", [1; STEPS_PER_TRACK]);
    let track = Track::read(&mut Reader::from_byte_slice(&bytes))
        .unwrap()
        .unwrap();
    assert_eq!(track.name(), "");
    assert_eq!(track.steps().active_count(), STEPS_PER_TRACK);
    assert_eq!(track.to_string(), "(255) \t|xxxx|xxxx|xxxx|xxxx|");
}

#[test]
fn tracks_stop_after_error() {
    let mut bytes = record(0, b"snare", [0; STEPS_PER_TRACK]);
    bytes.extend_from_slice(&[2, 0, 0]);
    let mut reader = Reader::from_byte_slice(&bytes);
    let mut tracks = Tracks::new(&mut reader);

    assert!(tracks.next().unwrap().is_ok());
    let err = tracks.next().unwrap().unwrap_err();
    assert!(err.is_truncated());
    assert!(tracks.next().is_none());
}

#[test]
fn invalid_utf8_name_is_malformed() {
    let bytes = record(3, &[0xC3, 0x28], [0; STEPS_PER_TRACK]);
    let err = Track::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.position(), 5);
}
