//! Ingestion error kinds and error value helpers.
//!
//! ```rust
//! use rtable::{IngestError, IngestErrorKind};
//!
//! let err = IngestError::too_large("file exceeds the upload cap");
//! assert_eq!(err.kind, IngestErrorKind::TooLarge);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestErrorKind {
    /// Byte length exceeds the upload cap; checked before any parse attempt.
    TooLarge,
    /// Payload is not valid UTF-8 text.
    Encoding,
    /// Payload is not well-formed CSV.
    Format,
    /// CSV parsed but the column layout does not match the expected shape.
    Shape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestError {
    pub kind: IngestErrorKind,
    pub message: String,
}

impl IngestError {
    pub fn new(kind: IngestErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn too_large(message: impl Into<String>) -> Self {
        Self::new(IngestErrorKind::TooLarge, message)
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(IngestErrorKind::Encoding, message)
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(IngestErrorKind::Format, message)
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::new(IngestErrorKind::Shape, message)
    }
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for IngestError {}
