//! Read-side API, symmetric to the writer.
//!
//! Unlike the write side, every read is bounds-checked: the bound buffer may
//! come off the wire, and a corrupt or truncated stream must surface
//! [`ReadError::OutOfBounds`] instead of undefined bytes.

use alloc::string::String;

use crate::{
    error::ReadError,
    options::ReaderOptions,
    strings, varint,
};

/// The read side of the codec, over an externally owned byte span.
///
/// The reader never copies the bound buffer; [`Reader::read_bytes`] hands
/// back sub-slices borrowing from it. [`Reader::reset`] rebinds the reader to
/// a new span with the cursor at zero, mirroring the writer's session reuse.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    cursor: usize,
    encoding_tag: bool,
}

impl<'a> Reader<'a> {
    /// Creates a reader bound to `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8], options: ReaderOptions) -> Self {
        Self {
            buf,
            cursor: 0,
            encoding_tag: options.encoding_tag,
        }
    }

    /// Rebinds the reader to a new byte span and rewinds the cursor.
    pub fn reset(&mut self, buf: &'a [u8]) {
        self.buf = buf;
        self.cursor = 0;
    }

    /// Takes the next `n` bytes, advancing the cursor.
    fn take(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        let bytes = self
            .cursor
            .checked_add(n)
            .and_then(|end| self.buf.get(self.cursor..end))
            .ok_or(ReadError::OutOfBounds {
                offset: self.cursor,
                requested: n,
                len: self.buf.len(),
            })?;
        self.cursor += n;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        Ok(self.take(1)?[0])
    }

    /// Reads one signed byte.
    #[expect(clippy::cast_possible_wrap)]
    pub fn read_i8(&mut self) -> Result<i8, ReadError> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    /// Reads a little-endian `i16`.
    pub fn read_i16(&mut self) -> Result<i16, ReadError> {
        Ok(i16::from_le_bytes(self.take_array()?))
    }

    /// Reads three little-endian bytes, sign-extended to an `i32`.
    pub fn read_i24(&mut self) -> Result<i32, ReadError> {
        let [b0, b1, b2] = self.take_array()?;
        let raw = i32::from_le_bytes([b0, b1, b2, 0]);
        // Shift the 24-bit value into the high bits and back to sign-extend.
        Ok(raw << 8 >> 8)
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, ReadError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32(&mut self) -> Result<i32, ReadError> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64, ReadError> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    /// Reads a little-endian `i64`.
    pub fn read_i64(&mut self) -> Result<i64, ReadError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    /// Reads a little-endian IEEE 754 `f32`.
    pub fn read_f32(&mut self) -> Result<f32, ReadError> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    /// Reads a little-endian IEEE 754 `f64`.
    pub fn read_f64(&mut self) -> Result<f64, ReadError> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    /// Reads a 1–5 byte `VarInt32`.
    pub fn read_var_u32(&mut self) -> Result<u32, ReadError> {
        let (value, consumed) = varint::take_var_u32(self.buf, self.cursor)?;
        self.cursor += consumed;
        Ok(value)
    }

    /// Reads a length-prefixed string written by
    /// [`Writer::write_string`](crate::Writer::write_string).
    ///
    /// Consumes the encoding tag first when the reader was constructed with
    /// [`ReaderOptions::encoding_tag`]. Multi-byte payloads are decoded as
    /// strict UTF-8.
    pub fn read_string(&mut self) -> Result<String, ReadError> {
        let single_byte = if self.encoding_tag {
            match self.read_u8()? {
                strings::LATIN1 => true,
                strings::UTF8 => false,
                tag => return Err(ReadError::UnknownEncodingTag(tag)),
            }
        } else {
            false
        };
        let len = self.read_var_u32()? as usize;
        let payload_offset = self.cursor;
        let bytes = self.take(len)?;
        if single_byte {
            Ok(strings::get_latin1(bytes))
        } else {
            strings::get_utf8(bytes, payload_offset)
        }
    }

    /// Takes a raw byte run of length `len`, borrowing from the bound buffer.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        self.take(len)
    }

    /// Advances the cursor by `n` without decoding, bounds-checked.
    pub fn skip(&mut self, n: usize) -> Result<(), ReadError> {
        self.take(n).map(|_| ())
    }

    /// Next read offset.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes left between the cursor and the end of the bound buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.cursor
    }
}
