use crate::FieldError;
use core::fmt;
use std::io;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while reading a SPLICE stream into a [`Pattern`](crate::prelude::Pattern)
"#]
#[derive(Debug, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: u64,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The stream does not start with the `SPLICE` marker,
    /// or its header could not be read at all.
    #[error("Not a SPLICE stream")]
    NotSplice,
    /// A track record runs past the end of the frame.
    #[error("Truncated {field}: expected {expected} bytes, found {found}")]
    TruncatedRecord {
        /// The field being read when input ran out
        field: Field,
        /// Bytes the field requires
        expected: u64,
        /// Bytes that were actually available
        found: u64,
    },
    /// A fixed-format field could not be decoded from its bytes.
    #[error("Malformed {field}: {reason}")]
    MalformedField {
        /// The offending field
        field: Field,
        /// Why it could not be decoded
        reason: FieldError,
    },
    /// The underlying byte source failed.
    #[error("I/O {0}")]
    Io(#[from] io::Error),
}

/// Identifies a field of the SPLICE frame.
///
/// Used to report where a read went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The 6 byte `SPLICE` marker
    Magic,
    /// The 8 byte big-endian declared payload length
    PayloadLength,
    /// The 32 byte NUL padded version string
    Version,
    /// The 4 byte little-endian tempo
    Tempo,
    /// A track's 1 byte identifier
    TrackId,
    /// A track's 4 byte big-endian name length
    NameLength,
    /// A track's name bytes
    TrackName,
    /// A track's 16 step flags
    Steps,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Magic => "magic marker",
            Self::PayloadLength => "payload length",
            Self::Version => "version",
            Self::Tempo => "tempo",
            Self::TrackId => "track id",
            Self::NameLength => "track name length",
            Self::TrackName => "track name",
            Self::Steps => "track steps",
        };
        f.write_str(name)
    }
}

impl ReaderErrorKind {
    pub(crate) const fn truncated(field: Field, expected: u64, found: u64) -> Self {
        Self::TruncatedRecord {
            field,
            expected,
            found,
        }
    }
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: u64, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if the stream was rejected as not being a SPLICE stream
    pub const fn is_not_splice(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::NotSplice)
    }
    /// True if a record ran past the available input
    pub const fn is_truncated(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::TruncatedRecord { .. })
    }
    /// True if a field could not be decoded
    pub const fn is_malformed(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::MalformedField { .. })
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Consumes the error, returning its kind.
    pub fn into_kind(self) -> ReaderErrorKind {
        self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Create a new not-splice error
    pub const fn not_splice(position: u64) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::NotSplice,
        }
    }

    /// Create a new truncation error
    pub const fn truncated(position: u64, field: Field, expected: u64, found: u64) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::truncated(field, expected, found),
        }
    }

    /// Create a new malformed field error
    pub fn malformed(position: u64, field: Field, reason: impl Into<FieldError>) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::MalformedField {
                field,
                reason: reason.into(),
            },
        }
    }

    /// Wrap an error from the underlying source
    pub const fn io(position: u64, error: io::Error) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::Io(error),
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

#[test]
fn error_display_includes_position_and_field() {
    use pretty_assertions::assert_eq;
    let err = ReaderError::truncated(62, Field::Steps, 16, 12);
    assert_eq!(
        err.to_string(),
        "Reading at Position 62, Truncated track steps: expected 16 bytes, found 12"
    );
    assert!(err.is_truncated());
    assert!(!err.is_not_splice());
}
