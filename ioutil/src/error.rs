use std::io;

use thiserror::Error;

use crate::format::PrefixWidth;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    #[error("Short read: expected {expected} bytes, stream ended after {read}")]
    ShortRead { expected: usize, read: usize },

    #[error("Short write: expected {expected} bytes, stream accepted {written}")]
    ShortWrite { expected: usize, written: usize },

    #[error("Length {len} exceeds the allowed limit {limit}")]
    LengthOverflow { len: u64, limit: u64 },

    #[error("Unknown time zone: {0:?}")]
    UnknownTimeZone(String),

    #[error("Format mismatch: writer uses {writer:?} length prefixes, reader expects {reader:?}")]
    FormatMismatch {
        writer: PrefixWidth,
        reader: PrefixWidth,
    },

    #[error("Timestamp {0}s lies before the Unix epoch")]
    BeforeEpoch(i64),

    #[error("Timestamp {0}s is outside the representable calendar range")]
    TimestampOutOfRange(u64),

    #[error("Text payload is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl CodecError {
    /// True for the variants caused by the stream under-delivering rather
    /// than by malformed content.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::ShortRead { .. } | Self::ShortWrite { .. })
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
