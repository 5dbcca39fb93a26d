use std::io;

use thiserror::Error;

use super::types::PropertyID;

/// The broad classes of failure.
///
/// None of them is recoverable while parsing: either the whole header parses or the archive is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SevenZErrorKind {
    /// Observed bytes differ from what the format requires (tags, magic, checksums).
    FormatMismatch,
    /// The archive is well-formed, but uses a feature outside of what this crate reads.
    Unsupported,
    /// A read crossed a limit, a sub-stream boundary or the end of the data.
    BoundsViolation,
    /// The payload decoder failed.
    DecodeFailure,
    /// A file was requested by a name the archive doesn't contain.
    NotFound,
    /// The underlying byte source failed.
    Io,
}

/// The error type returned by everything in this crate.
#[derive(Debug, Error)]
pub enum SevenZError {
    #[error("bad signature {0:02x?}")]
    BadSignature([u8; 6]),

    #[error("expected {expected:?}, found property id {observed:#04x}")]
    TagMismatch { expected: PropertyID, observed: u8 },

    #[error("{what} checksum mismatch (stored {stored:#010x}, computed {computed:#010x})")]
    ChecksumMismatch {
        what: &'static str,
        stored: u32,
        computed: u32,
    },

    #[error("{files} files carry a stream, but the folder holds {substreams} substreams")]
    StreamCountMismatch { files: usize, substreams: usize },

    #[error("file {index} has no name")]
    MissingName { index: usize },

    #[error("section {id:#04x} declared {declared} bytes, but {consumed} were consumed")]
    SectionLength { id: u8, declared: u64, consumed: u64 },

    #[error("file name is not valid UTF-16")]
    InvalidName,

    #[error("invalid LZMA properties: {0}")]
    InvalidCodecProperties(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("read past limit {limit} (position {position})")]
    BoundsViolation { limit: u64, position: u64 },

    #[error("unexpected end of data at position {position}")]
    UnexpectedEof { position: u64 },

    #[error("decoded stream cannot seek to offset {offset}")]
    SeekUnsupported { offset: u64 },

    #[error("decoder error: {0}")]
    Decode(#[source] io::Error),

    #[error("no file named {0:?}")]
    NoSuchFileName(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SevenZError {
    /// Shorthand for an `Unsupported` error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        return SevenZError::Unsupported(feature.into());
    }

    /// Which class of failure this is.
    pub fn kind(&self) -> SevenZErrorKind {
        use SevenZError::*;
        match self {
            BadSignature(_)
            | TagMismatch { .. }
            | ChecksumMismatch { .. }
            | StreamCountMismatch { .. }
            | MissingName { .. }
            | SectionLength { .. }
            | InvalidName
            | InvalidCodecProperties(_) => return SevenZErrorKind::FormatMismatch,
            Unsupported(_) => return SevenZErrorKind::Unsupported,
            BoundsViolation { .. } | UnexpectedEof { .. } => {
                return SevenZErrorKind::BoundsViolation
            }
            SeekUnsupported { .. } | Decode(_) => return SevenZErrorKind::DecodeFailure,
            NoSuchFileName(_) => return SevenZErrorKind::NotFound,
            Io(_) => return SevenZErrorKind::Io,
        }
    }
}

/// Result type used throughout the crate.
pub type SevenZResult<T> = Result<T, SevenZError>;
