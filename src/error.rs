use core::str::Utf8Error;
use thiserror::Error;

/// Describes why a fixed-format field could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Fewer bytes were available than the field is wide.
    #[error("expected {expected} bytes, found {found}")]
    Short {
        /// Width of the field
        expected: u64,
        /// Bytes actually available
        found: u64,
    },
    /// Text fields must hold UTF-8.
    #[error("invalid UTF-8 ({0})")]
    Utf8(#[from] Utf8Error),
}
