//! Subcommand bodies. Encoders build the whole record in memory and write it
//! to disk in one call, so a failed encode never leaves a partial file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use ioutil::{decode, encode, timeutil, CountingReader};
use log::{info, warn};

/// A decoded value and how much of the input it took.
#[derive(Debug)]
pub struct Decoded<T> {
    pub value: T,
    pub consumed: u64,
    pub trailing: u64,
}

fn write_record(out: &Path, buf: &[u8]) -> Result<()> {
    fs::write(out, buf).with_context(|| format!("Cannot write {}", out.display()))?;
    info!("wrote {} bytes to {}", buf.len(), out.display());
    Ok(())
}

fn decode_file<T>(
    input: &Path,
    f: impl FnOnce(&mut CountingReader<&[u8]>) -> ioutil::Result<T>,
) -> Result<Decoded<T>> {
    let bz = fs::read(input).with_context(|| format!("Cannot read {}", input.display()))?;
    let mut r = CountingReader::new(bz.as_slice());
    let value = f(&mut r).with_context(|| format!("Cannot decode {}", input.display()))?;
    let consumed = r.count();
    let trailing = bz.len() as u64 - consumed;
    if trailing > 0 {
        warn!(
            "{} has {} trailing bytes after the record",
            input.display(),
            trailing
        );
    }
    Ok(Decoded {
        value,
        consumed,
        trailing,
    })
}

pub fn encode_string(text: &str, out: &Path) -> Result<usize> {
    let mut buf = Vec::new();
    let size = encode::write_string(&mut buf, text)?;
    write_record(out, &buf)?;
    Ok(size)
}

pub fn decode_string(input: &Path) -> Result<Decoded<String>> {
    decode_file(input, |r| decode::read_string(r))
}

pub fn encode_time(epoch: u64, zone: &str, out: &Path) -> Result<usize> {
    if zone.parse::<Tz>().is_err() {
        warn!("zone {:?} is not in the local time zone database", zone);
    }
    let mut buf = Vec::new();
    let size = encode::write_time_parts(&mut buf, epoch, zone)?;
    write_record(out, &buf)?;
    Ok(size)
}

pub fn decode_time(input: &Path) -> Result<Decoded<DateTime<Tz>>> {
    decode_file(input, |r| decode::read_time(r))
}

pub fn day_start(t: &DateTime<Tz>) -> Result<DateTime<Tz>> {
    timeutil::begin_of_day(t).with_context(|| format!("No valid local midnight for {}", t))
}
