//! Wire format declaration.
//!
//! A wire format is the fixed combination of string length-prefix width and
//! allocation ceiling that every writer and reader of one deployment agrees on.
//! There is no header, version tag or checksum on the wire, so the format is
//! an operational convention: it is declared here once, in [`WIRE_FORMAT`],
//! and the default encode/decode entry points use it.
//!
//! # Layout
//! ```text
//! uint8                    : 1 byte
//! uint16 / uint32 / uint64 : 2 / 4 / 8 bytes, big-endian
//! string                   : [length prefix][raw bytes]
//! time                     : [uint64 epoch seconds][string zone name]
//! ```
//!
//! Mixing prefix widths between a writer and a reader is a protocol violation.
//! Readers that receive the writer's format out of band should call
//! [`WireFormat::ensure_compatible`] instead of guessing.

use crate::error::{CodecError, Result};

/// Largest payload a reader will allocate for a single string (16MB).
pub const MAX_PAYLOAD_LEN: u64 = 16 * 1024 * 1024;

/// Width of the integer holding the epoch seconds of a timestamp.
pub const EPOCH_FIELD_LEN: usize = 8;

/// The format every default entry point reads and writes.
pub const WIRE_FORMAT: WireFormat = WireFormat::V1;

/// Width of a string length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixWidth {
    U8,
    U16,
    U32,
    U64,
}

impl PrefixWidth {
    /// Number of bytes the prefix occupies on the wire.
    pub const fn byte_len(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    /// Largest payload length the prefix can express.
    pub const fn max_len(self) -> u64 {
        match self {
            Self::U8 => u8::MAX as u64,
            Self::U16 => u16::MAX as u64,
            Self::U32 => u32::MAX as u64,
            Self::U64 => u64::MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireFormat {
    pub prefix: PrefixWidth,
    /// Allocation ceiling applied to string payloads on both sides.
    pub max_payload_len: u64,
}

impl WireFormat {
    /// 32-bit length prefixes, 16MB payload ceiling.
    pub const V1: WireFormat = WireFormat {
        prefix: PrefixWidth::U32,
        max_payload_len: MAX_PAYLOAD_LEN,
    };

    pub const fn new(prefix: PrefixWidth, max_payload_len: u64) -> Self {
        Self {
            prefix,
            max_payload_len,
        }
    }

    /// The tighter of the prefix range and the allocation ceiling.
    pub fn payload_limit(&self) -> u64 {
        self.prefix.max_len().min(self.max_payload_len)
    }

    /// Bytes a string with `payload_len` bytes occupies on the wire.
    pub fn encoded_len(&self, payload_len: usize) -> usize {
        self.prefix.byte_len() + payload_len
    }

    /// Bytes a timestamp whose zone name has `zone_len` bytes occupies.
    pub fn encoded_time_len(&self, zone_len: usize) -> usize {
        EPOCH_FIELD_LEN + self.encoded_len(zone_len)
    }

    pub(crate) fn check_len(&self, len: u64) -> Result<()> {
        let limit = self.payload_limit();
        if len > limit {
            return Err(CodecError::LengthOverflow { len, limit });
        }
        Ok(())
    }

    /// Rejects a writer whose prefix width differs from this reader's.
    pub fn ensure_compatible(&self, writer: &WireFormat) -> Result<()> {
        if self.prefix != writer.prefix {
            return Err(CodecError::FormatMismatch {
                writer: writer.prefix,
                reader: self.prefix,
            });
        }
        Ok(())
    }
}

impl Default for WireFormat {
    fn default() -> Self {
        WIRE_FORMAT
    }
}
