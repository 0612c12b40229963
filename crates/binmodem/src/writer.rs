//! Write-side API composing the sink, the varint codec and the string codec.

use alloc::{boxed::Box, vec::Vec};

use crate::{
    options::{FastStringOps, WriterOptions},
    sink::ByteSink,
    strings, varint,
};

/// How strings are classified and copied, resolved once at construction.
enum StringStrategy {
    /// Length-comparison classification, per-character copies.
    Generic,
    /// Injected classifier and bulk copy.
    Accelerated(Box<dyn FastStringOps>),
}

/// The write side of the codec.
///
/// One instance per concurrent encode session; a session runs construct (or
/// [`Writer::reset`]) → primitive writes → [`Writer::dump`] to completion
/// before the instance is reused. No operation fails for in-contract inputs:
/// numeric narrowing follows standard fixed-width truncation and is the
/// caller's responsibility, as is reserving capacity ahead of variable-sized
/// regions written through [`Writer::put_bytes_unchecked`].
pub struct Writer {
    sink: ByteSink,
    encoding_tag: bool,
    strategy: StringStrategy,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new(WriterOptions::default())
    }
}

impl Writer {
    /// Creates a writer, resolving the string strategy from `options`.
    #[must_use]
    pub fn new(options: WriterOptions) -> Self {
        Self {
            sink: ByteSink::new(),
            encoding_tag: options.encoding_tag,
            strategy: match options.fast_string_ops {
                Some(ops) => StringStrategy::Accelerated(ops),
                None => StringStrategy::Generic,
            },
        }
    }

    /// Guarantees `n` more writable bytes; cumulative until [`Writer::reset`].
    pub fn reserve(&mut self, n: usize) {
        self.sink.reserve(n);
    }

    /// Rewinds the writer for a new encode session, retaining the pooled
    /// buffer when it stayed below the high-water mark.
    pub fn reset(&mut self) {
        self.sink.reset();
    }

    /// Copies the written region out into an independently owned buffer.
    #[must_use]
    pub fn dump(&mut self) -> Vec<u8> {
        self.sink.dump()
    }

    /// Advances the cursor without writing, reserving a hole for a later
    /// [`Writer::set_u32_at`] patch.
    pub fn skip(&mut self, n: usize) {
        self.sink.skip(n);
    }

    /// Patches a 4-byte little-endian field at `offset`, which must lie
    /// within the written region. Used to backpatch length prefixes computed
    /// after the fact.
    pub fn set_u32_at(&mut self, offset: usize, v: u32) {
        self.sink.set_u32_at(offset, v);
    }

    /// Writes one byte.
    pub fn write_u8(&mut self, v: u8) {
        self.sink.put_u8(v);
    }

    /// Writes one signed byte.
    pub fn write_i8(&mut self, v: i8) {
        self.sink.put_i8(v);
    }

    /// Writes a `u16`, little-endian.
    pub fn write_u16(&mut self, v: u16) {
        self.sink.put_u16(v);
    }

    /// Writes an `i16`, little-endian.
    pub fn write_i16(&mut self, v: i16) {
        self.sink.put_i16(v);
    }

    /// Writes the low 24 bits of `v` as three little-endian bytes; the
    /// reference-header word travels through this.
    pub fn write_i24(&mut self, v: i32) {
        self.sink.put_i24(v);
    }

    /// Writes a `u32`, little-endian.
    pub fn write_u32(&mut self, v: u32) {
        self.sink.put_u32(v);
    }

    /// Writes an `i32`, little-endian.
    pub fn write_i32(&mut self, v: i32) {
        self.sink.put_i32(v);
    }

    /// Writes a `u64`, little-endian.
    pub fn write_u64(&mut self, v: u64) {
        self.sink.put_u64(v);
    }

    /// Writes an `i64`, little-endian.
    pub fn write_i64(&mut self, v: i64) {
        self.sink.put_i64(v);
    }

    /// Writes an `f32`, little-endian IEEE 754.
    pub fn write_f32(&mut self, v: f32) {
        self.sink.put_f32(v);
    }

    /// Writes an `f64`, little-endian IEEE 754.
    pub fn write_f64(&mut self, v: f64) {
        self.sink.put_f64(v);
    }

    /// Writes `v` as a 1–5 byte `VarInt32`.
    pub fn write_var_u32(&mut self, v: u32) {
        varint::put_var_u32(&mut self.sink, v);
    }

    /// Splices a raw byte run into the stream, growing as needed.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.sink.put_bytes(bytes);
    }

    /// Copies a pre-validated span without capacity checks. Caller contract:
    /// the span's length was already reserved.
    pub fn put_bytes_unchecked(&mut self, bytes: &[u8]) {
        self.sink.put_bytes_unchecked(bytes);
    }

    /// Writes a length-prefixed string, selecting the single-byte or
    /// multi-byte path by the strategy resolved at construction.
    ///
    /// With the encoding tag enabled the payload is preceded by
    /// [`LATIN1`](crate::LATIN1) or [`UTF8`](crate::UTF8); otherwise every
    /// string is written as untagged UTF-8. The length prefix is the encoded
    /// byte length, which on the single-byte path equals the character count.
    #[expect(clippy::cast_possible_truncation)]
    pub fn write_string(&mut self, s: &str) {
        let single_byte = self.encoding_tag
            && match &self.strategy {
                StringStrategy::Generic => strings::classify_generic(s),
                StringStrategy::Accelerated(ops) => ops.is_latin1(s),
            };
        let len = if single_byte { strings::utf16_len(s) } else { s.len() };
        if self.encoding_tag {
            self.sink
                .put_u8(if single_byte { strings::LATIN1 } else { strings::UTF8 });
        }
        varint::put_var_u32(&mut self.sink, len as u32);
        self.sink.reserve(len);
        match &self.strategy {
            StringStrategy::Accelerated(ops) if single_byte => {
                ops.latin1_copy(s, self.sink.claim(len));
            }
            StringStrategy::Accelerated(ops) if len >= strings::BULK_THRESHOLD => {
                ops.utf8_copy(s, self.sink.claim(len));
            }
            _ if single_byte => strings::put_latin1(&mut self.sink, s, len),
            _ => strings::put_utf8(&mut self.sink, s),
        }
    }

    /// Next write offset.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.sink.cursor()
    }

    /// Cumulative reserved bytes since the last reset.
    #[must_use]
    pub fn reserved(&self) -> usize {
        self.sink.reserved()
    }

    /// Current backing capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.sink.capacity()
    }

    /// Borrowed view of the written region, for callers that consume the
    /// stream in place instead of snapshotting it.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        self.sink.written()
    }
}

impl core::fmt::Debug for Writer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Writer")
            .field("cursor", &self.sink.cursor())
            .field("capacity", &self.sink.capacity())
            .field("encoding_tag", &self.encoding_tag)
            .field(
                "accelerated",
                &matches!(self.strategy, StringStrategy::Accelerated(_)),
            )
            .finish()
    }
}
