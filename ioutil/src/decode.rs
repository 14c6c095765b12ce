//! Decoding side of the codec.
//!
//! Mirrors [`crate::encode`]. A single `read` call on the stream may return
//! fewer bytes than asked for; the decoder keeps reading until the field is
//! complete and only fails with [`CodecError::ShortRead`] once the stream
//! reports end of data. String payloads are checked against the format's
//! allocation ceiling before any buffer is reserved.

use std::io::{ErrorKind, Read};

use byteorder::{BigEndian, ByteOrder};
use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use log::{debug, warn};

use crate::error::{CodecError, Result};
use crate::format::{PrefixWidth, WireFormat, WIRE_FORMAT};

/// Upper bound on how much buffer is grown ahead of the bytes actually
/// delivered while filling a string payload.
const READ_CHUNK: usize = 64 * 1024;

fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(CodecError::ShortRead {
                    expected: buf.len(),
                    read: filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

pub fn read_u8<R: Read + ?Sized>(r: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_full(r, &mut buf)?;
    Ok(buf[0])
}

pub fn read_u16<R: Read + ?Sized>(r: &mut R) -> Result<u16> {
    let mut buf = [0u8; 2];
    read_full(r, &mut buf)?;
    Ok(BigEndian::read_u16(&buf))
}

pub fn read_u32<R: Read + ?Sized>(r: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    read_full(r, &mut buf)?;
    Ok(BigEndian::read_u32(&buf))
}

pub fn read_u64<R: Read + ?Sized>(r: &mut R) -> Result<u64> {
    let mut buf = [0u8; 8];
    read_full(r, &mut buf)?;
    Ok(BigEndian::read_u64(&buf))
}

fn read_prefix<R: Read + ?Sized>(r: &mut R, width: PrefixWidth) -> Result<u64> {
    Ok(match width {
        PrefixWidth::U8 => read_u8(r)? as u64,
        PrefixWidth::U16 => read_u16(r)? as u64,
        PrefixWidth::U32 => read_u32(r)? as u64,
        PrefixWidth::U64 => read_u64(r)?,
    })
}

/// Reads a length prefix and exactly that many raw bytes.
pub fn read_bytes_with<R: Read + ?Sized>(r: &mut R, format: &WireFormat) -> Result<Vec<u8>> {
    let declared = read_prefix(r, format.prefix)?;
    if let Err(e) = format.check_len(declared) {
        warn!("rejecting length prefix {}: {}", declared, e);
        return Err(e);
    }
    if declared == 0 {
        return Ok(Vec::new());
    }
    let len = usize::try_from(declared).map_err(|_| CodecError::LengthOverflow {
        len: declared,
        limit: usize::MAX as u64,
    })?;

    let mut bz = Vec::with_capacity(len.min(READ_CHUNK));
    while bz.len() < len {
        let start = bz.len();
        let end = len.min(start + READ_CHUNK);
        bz.resize(end, 0);
        read_full(r, &mut bz[start..end]).map_err(|e| match e {
            CodecError::ShortRead { read, .. } => CodecError::ShortRead {
                expected: len,
                read: start + read,
            },
            e => e,
        })?;
    }
    Ok(bz)
}

pub fn read_bytes<R: Read + ?Sized>(r: &mut R) -> Result<Vec<u8>> {
    read_bytes_with(r, &WIRE_FORMAT)
}

/// Like [`read_bytes_with`], but the payload must be UTF-8.
pub fn read_string_with<R: Read + ?Sized>(r: &mut R, format: &WireFormat) -> Result<String> {
    let bz = read_bytes_with(r, format)?;
    Ok(String::from_utf8(bz)?)
}

pub fn read_string<R: Read + ?Sized>(r: &mut R) -> Result<String> {
    read_string_with(r, &WIRE_FORMAT)
}

/// Reads epoch seconds and a zone name, then resolves the name against the
/// bundled IANA database. The result is presented in the resolved zone; its
/// instant is exactly the decoded second count.
pub fn read_time_with<R: Read + ?Sized>(r: &mut R, format: &WireFormat) -> Result<DateTime<Tz>> {
    let secs = read_u64(r)?;
    let zone = read_string_with(r, format)?;
    let tz: Tz = match zone.parse() {
        Ok(tz) => tz,
        Err(_) => {
            debug!("time zone {:?} does not resolve", zone);
            return Err(CodecError::UnknownTimeZone(zone));
        }
    };
    let signed = i64::try_from(secs).map_err(|_| CodecError::TimestampOutOfRange(secs))?;
    tz.timestamp_opt(signed, 0)
        .single()
        .ok_or(CodecError::TimestampOutOfRange(secs))
}

pub fn read_time<R: Read + ?Sized>(r: &mut R) -> Result<DateTime<Tz>> {
    read_time_with(r, &WIRE_FORMAT)
}
