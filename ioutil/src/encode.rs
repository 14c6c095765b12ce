//! Encoding side of the codec.
//!
//! Every function takes a writable stream and returns the number of bytes it
//! wrote. Each primitive is handed to the stream as one write call; a stream
//! that accepts fewer bytes than offered fails the call with
//! [`CodecError::ShortWrite`]. Composite values (strings, timestamps) are
//! several writes in sequence and are not rolled back when a later step
//! fails. Callers that need all-or-nothing output should encode into a
//! `Vec<u8>` first and write that buffer as one unit.

use std::io::{ErrorKind, Write};

use byteorder::{BigEndian, ByteOrder};
use chrono::DateTime;
use chrono_tz::Tz;
use log::debug;

use crate::error::{CodecError, Result};
use crate::format::{PrefixWidth, WireFormat, WIRE_FORMAT};

fn write_raw<W: Write + ?Sized>(w: &mut W, bz: &[u8]) -> Result<usize> {
    loop {
        match w.write(bz) {
            Ok(written) if written == bz.len() => return Ok(written),
            Ok(written) => {
                debug!("short write: {} of {} bytes accepted", written, bz.len());
                return Err(CodecError::ShortWrite {
                    expected: bz.len(),
                    written,
                });
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

pub fn write_u8<W: Write + ?Sized>(w: &mut W, value: u8) -> Result<usize> {
    write_raw(w, &[value])
}

pub fn write_u16<W: Write + ?Sized>(w: &mut W, value: u16) -> Result<usize> {
    let mut buf = [0u8; 2];
    BigEndian::write_u16(&mut buf, value);
    write_raw(w, &buf)
}

pub fn write_u32<W: Write + ?Sized>(w: &mut W, value: u32) -> Result<usize> {
    let mut buf = [0u8; 4];
    BigEndian::write_u32(&mut buf, value);
    write_raw(w, &buf)
}

pub fn write_u64<W: Write + ?Sized>(w: &mut W, value: u64) -> Result<usize> {
    let mut buf = [0u8; 8];
    BigEndian::write_u64(&mut buf, value);
    write_raw(w, &buf)
}

/// Writes `len` with the width the format prescribes. `len` must already
/// have passed `WireFormat::check_len`.
fn write_prefix<W: Write + ?Sized>(w: &mut W, width: PrefixWidth, len: u64) -> Result<usize> {
    match width {
        PrefixWidth::U8 => write_u8(w, len as u8),
        PrefixWidth::U16 => write_u16(w, len as u16),
        PrefixWidth::U32 => write_u32(w, len as u32),
        PrefixWidth::U64 => write_u64(w, len),
    }
}

/// Writes a length prefix followed by `bz`. An empty slice writes only the
/// zero prefix.
pub fn write_bytes_with<W: Write + ?Sized>(
    w: &mut W,
    bz: &[u8],
    format: &WireFormat,
) -> Result<usize> {
    let len = bz.len() as u64;
    format.check_len(len)?;
    let size = write_prefix(w, format.prefix, len)?;
    if bz.is_empty() {
        return Ok(size);
    }
    Ok(size + write_raw(w, bz)?)
}

pub fn write_bytes<W: Write + ?Sized>(w: &mut W, bz: &[u8]) -> Result<usize> {
    write_bytes_with(w, bz, &WIRE_FORMAT)
}

pub fn write_string_with<W: Write + ?Sized>(
    w: &mut W,
    text: &str,
    format: &WireFormat,
) -> Result<usize> {
    write_bytes_with(w, text.as_bytes(), format)
}

pub fn write_string<W: Write + ?Sized>(w: &mut W, text: &str) -> Result<usize> {
    write_string_with(w, text, &WIRE_FORMAT)
}

/// Writes a timestamp from its raw parts. The zone name is not validated
/// here; an unknown name is only detected by the reader.
pub fn write_time_parts_with<W: Write + ?Sized>(
    w: &mut W,
    epoch_secs: u64,
    zone: &str,
    format: &WireFormat,
) -> Result<usize> {
    let size1 = write_u64(w, epoch_secs)?;
    let size2 = write_string_with(w, zone, format)?;
    Ok(size1 + size2)
}

pub fn write_time_parts<W: Write + ?Sized>(w: &mut W, epoch_secs: u64, zone: &str) -> Result<usize> {
    write_time_parts_with(w, epoch_secs, zone, &WIRE_FORMAT)
}

/// Writes the whole-second instant of `value` and the IANA name of its zone.
/// Sub-second precision is dropped. Instants before 1970 are rejected with
/// [`CodecError::BeforeEpoch`] before anything is written.
pub fn write_time_with<W: Write + ?Sized>(
    w: &mut W,
    value: &DateTime<Tz>,
    format: &WireFormat,
) -> Result<usize> {
    let secs = value.timestamp();
    if secs < 0 {
        return Err(CodecError::BeforeEpoch(secs));
    }
    write_time_parts_with(w, secs as u64, value.timezone().name(), format)
}

pub fn write_time<W: Write + ?Sized>(w: &mut W, value: &DateTime<Tz>) -> Result<usize> {
    write_time_with(w, value, &WIRE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use chrono::TimeZone;

    /// Accepts at most `cap` bytes per write call, then reports 0.
    struct Stingy {
        data: Vec<u8>,
        cap: usize,
        budget: usize,
    }

    impl Write for Stingy {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.cap).min(self.budget);
            self.data.extend_from_slice(&buf[..n]);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Fails the first call with `Interrupted`, then behaves like a Vec.
    struct Flaky {
        data: Vec<u8>,
        interrupted: bool,
    }

    impl Write for Flaky {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_integers_are_big_endian() {
        let mut out = vec![];
        assert_eq!(write_u8(&mut out, 0xab).unwrap(), 1);
        assert_eq!(write_u16(&mut out, 0x0102).unwrap(), 2);
        assert_eq!(write_u32(&mut out, 0x01020304).unwrap(), 4);
        assert_eq!(write_u64(&mut out, 0x0102030405060708).unwrap(), 8);
        assert_eq!(out, vec![0xab, 1, 2, 1, 2, 3, 4, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_string_layout() {
        let mut out = vec![];
        assert_eq!(write_string(&mut out, "ab").unwrap(), 6);
        assert_eq!(out, vec![0, 0, 0, 2, 0x61, 0x62]);
    }

    #[test]
    fn test_empty_string_still_writes_prefix() {
        let mut out = vec![];
        assert_eq!(write_u32(&mut out, 0).unwrap(), 4);
        assert_eq!(write_string(&mut out, "").unwrap(), 4);
        assert_eq!(out, vec![0u8; 8]);
    }

    #[test]
    fn test_prefix_width_follows_format() {
        let mut out = vec![];
        let fmt = WireFormat::new(PrefixWidth::U16, 1024);
        assert_eq!(write_string_with(&mut out, "xyz", &fmt).unwrap(), 5);
        assert_eq!(out, vec![0, 3, b'x', b'y', b'z']);

        out.clear();
        let fmt = WireFormat::new(PrefixWidth::U64, 1024);
        assert_eq!(write_bytes_with(&mut out, &[0xff], &fmt).unwrap(), 9);
        assert_eq!(out, vec![0, 0, 0, 0, 0, 0, 0, 1, 0xff]);
    }

    #[test]
    fn test_length_overflow_writes_nothing() {
        let mut out = vec![];
        let fmt = WireFormat::new(PrefixWidth::U8, 1024);
        let payload = vec![7u8; 256];
        match write_bytes_with(&mut out, &payload, &fmt) {
            Err(CodecError::LengthOverflow { len, limit }) => {
                assert_eq!(len, 256);
                assert_eq!(limit, 255);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_short_write_is_detected() {
        let mut w = Stingy {
            data: vec![],
            cap: 3,
            budget: usize::MAX,
        };
        match write_u64(&mut w, 42) {
            Err(CodecError::ShortWrite { expected, written }) => {
                assert_eq!(expected, 8);
                assert_eq!(written, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_zero_write_is_short_write() {
        let mut w = Stingy {
            data: vec![],
            cap: 16,
            budget: 0,
        };
        assert!(matches!(
            write_u8(&mut w, 1),
            Err(CodecError::ShortWrite {
                expected: 1,
                written: 0
            })
        ));
    }

    #[test]
    fn test_io_failure_propagates() {
        let mut w = Broken;
        match write_u32(&mut w, 1) {
            Err(CodecError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_interrupted_write_is_retried() {
        let mut w = Flaky {
            data: vec![],
            interrupted: false,
        };
        assert_eq!(write_u16(&mut w, 0xbeef).unwrap(), 2);
        assert_eq!(w.data, vec![0xbe, 0xef]);
    }

    #[test]
    fn test_time_layout() {
        let t = Tz::UTC.timestamp_opt(0x0102, 0).unwrap();
        let mut out = vec![];
        assert_eq!(write_time(&mut out, &t).unwrap(), 8 + 4 + 3);
        assert_eq!(out, vec![0, 0, 0, 0, 0, 0, 1, 2, 0, 0, 0, 3, b'U', b'T', b'C']);
    }

    #[test]
    fn test_time_uses_zone_name() {
        let t = chrono_tz::Asia::Shanghai
            .with_ymd_and_hms(2020, 1, 2, 8, 0, 0)
            .unwrap();
        let mut out = vec![];
        let n = write_time(&mut out, &t).unwrap();
        assert_eq!(n, 8 + 4 + "Asia/Shanghai".len());
        assert_eq!(&out[..8], &1577923200u64.to_be_bytes());
        assert_eq!(&out[12..], b"Asia/Shanghai");
    }

    #[test]
    fn test_time_before_epoch_is_rejected() {
        let t = Tz::UTC.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap();
        let mut out = vec![];
        assert!(matches!(
            write_time(&mut out, &t),
            Err(CodecError::BeforeEpoch(-1))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_failed_time_leaves_partial_output() {
        // the epoch field fits, the zone prefix does not
        let mut w = Stingy {
            data: vec![],
            cap: 8,
            budget: 10,
        };
        assert!(write_time_parts(&mut w, 5, "UTC").is_err());
        assert_eq!(w.data.len(), 10);
        assert_eq!(&w.data[..8], &5u64.to_be_bytes());
    }
}
