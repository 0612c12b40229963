//! Low-level binary encoding/decoding engine for a cross-language
//! object-serialization wire format.
//!
//! The crate converts primitive values — integers of several widths, floats,
//! strings, raw byte runs — into a compact little-endian byte stream and back,
//! and packs the per-value reference metadata (a nullability/sharing flag plus
//! a 16-bit type identifier) into a single 3-byte header word.
//!
//! The building blocks, leaves first:
//!
//! - [`ByteSink`]: an owned, growable byte buffer with a write cursor and a
//!   pooling policy that bounds long-run memory retention.
//! - The `VarInt32` codec ([`MAX_VAR_U32_BYTES`]): unsigned 32-bit integers at
//!   7 payload bits per byte.
//! - The string codec ([`encode_units`], [`decode_units`], [`LATIN1`],
//!   [`UTF8`]): a byte-per-character fast path for single-byte-encodable text
//!   and a general multi-byte transcoder, length-prefixed and optionally
//!   tagged.
//! - [`Writer`] / [`Reader`]: the composed write- and read-side APIs called
//!   once per field by the object-graph serializer layered above this crate.
//! - [`make_head`] / [`parse_head`]: the reference-header packing primitive
//!   consumed by the cycle tracker.
//!
//! The write side is infallible by contract: preconditions (reserved space,
//! in-bounds patch offsets, valid text) are the caller's responsibility. The
//! read side is the one genuinely fallible surface and fails loudly with
//! [`ReadError`] instead of returning undefined bytes.
//!
//! ```rust
//! use binmodem::{Reader, ReaderOptions, Writer, WriterOptions};
//!
//! let mut writer = Writer::new(WriterOptions::default());
//! writer.write_var_u32(300);
//! writer.write_string("hello");
//! let bytes = writer.dump();
//!
//! let mut reader = Reader::new(&bytes, ReaderOptions::default());
//! assert_eq!(reader.read_var_u32().unwrap(), 300);
//! assert_eq!(reader.read_string().unwrap(), "hello");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod options;
mod reader;
mod ref_head;
mod sink;
mod strings;
mod varint;
mod writer;

#[cfg(test)]
mod tests;

pub use error::ReadError;
pub use options::{FastStringOps, ReaderOptions, WriterOptions};
pub use reader::Reader;
pub use ref_head::{RefFlag, make_head, parse_head};
pub use sink::ByteSink;
pub use strings::{LATIN1, UTF8, decode_units, encode_units, encoded_units_len};
pub use varint::MAX_VAR_U32_BYTES;
pub use writer::Writer;
