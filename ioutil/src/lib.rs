//! # Primitive binary codec
//!
//! Reads and writes fixed-width unsigned integers, length-prefixed byte strings
//! and zoned timestamps over any `std::io::Write` / `std::io::Read`. Integers are
//! big-endian; strings carry a length prefix whose width is fixed by the
//! deployment's [`format::WireFormat`]; a timestamp is its Unix epoch seconds
//! as a `u64` followed by the IANA name of its time zone as a string.
//!
//! The codec holds no state. A record is whatever sequence of primitives the
//! caller writes, and it is read back by issuing the same sequence of reads
//! against the same stream:
//!
//! ```
//! use ioutil::{decode, encode};
//!
//! let mut wire = vec![];
//! encode::write_u32(&mut wire, 0).unwrap();
//! encode::write_string(&mut wire, "ab").unwrap();
//! assert_eq!(wire, [0, 0, 0, 0, 0, 0, 0, 2, b'a', b'b']);
//!
//! let mut rd = wire.as_slice();
//! assert_eq!(decode::read_u32(&mut rd).unwrap(), 0);
//! assert_eq!(decode::read_string(&mut rd).unwrap(), "ab");
//! ```
//!
//! Every call blocks until its bytes are fully transferred or an error occurs.
//! Nothing is locked internally, so one stream must not be shared between
//! concurrent callers without external serialization. Distinct streams can be
//! used from any number of threads.
//!
//! Besides the codec the crate carries a few small helpers: [`timeutil`] for
//! day truncation, [`path`] for locating the running executable and [`trace`]
//! for reporting failures at the process boundary.

pub mod counter;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod path;
pub mod timeutil;
pub mod trace;

pub use counter::{CountingReader, CountingWriter};
pub use error::{CodecError, Result};
pub use format::{PrefixWidth, WireFormat, WIRE_FORMAT};
