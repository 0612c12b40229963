//! `VarInt32`: variable-length encoding of a `u32` at 7 payload bits per
//! byte, least-significant group first, with `0x80` as the continuation bit.
//!
//! Zero encodes as a single zero byte; `u32::MAX` needs the full five bytes.

#![expect(clippy::cast_possible_truncation)]

use crate::{error::ReadError, sink::ByteSink};

/// Maximum encoded size of a `VarInt32`.
pub const MAX_VAR_U32_BYTES: usize = 5;

/// Appends `v` to the sink in `VarInt32` form.
///
/// Fixed-width write contract applies: at most [`MAX_VAR_U32_BYTES`] bytes
/// are emitted and the caller is responsible for capacity.
#[inline]
pub(crate) fn put_var_u32(sink: &mut ByteSink, mut v: u32) {
    while v > 0x7F {
        sink.put_u8((v as u8 & 0x7F) | 0x80);
        v >>= 7;
    }
    sink.put_u8(v as u8);
}

/// Encoded size of `v` in bytes (1–5).
#[inline]
pub(crate) fn var_u32_len(v: u32) -> usize {
    let mut len = 1;
    let mut v = v >> 7;
    while v != 0 {
        len += 1;
        v >>= 7;
    }
    len
}

/// Decodes a `VarInt32` from `buf` starting at `start`.
///
/// Returns the value and the number of bytes consumed.
pub(crate) fn take_var_u32(buf: &[u8], start: usize) -> Result<(u32, usize), ReadError> {
    let bytes = buf.get(start..).ok_or(ReadError::OutOfBounds {
        offset: start,
        requested: 1,
        len: buf.len(),
    })?;
    let mut acc = 0u32;
    let mut shift = 0;
    for (i, &b) in bytes.iter().take(MAX_VAR_U32_BYTES).enumerate() {
        acc |= u32::from(b & 0x7F) << shift;
        if b & 0x80 == 0 {
            return Ok((acc, i + 1));
        }
        shift += 7;
    }
    if bytes.len() < MAX_VAR_U32_BYTES {
        // Ran off the end of the buffer with the continuation bit still set.
        Err(ReadError::OutOfBounds {
            offset: start,
            requested: bytes.len() + 1,
            len: buf.len(),
        })
    } else {
        Err(ReadError::UnterminatedVarInt(start))
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_VAR_U32_BYTES, put_var_u32, take_var_u32, var_u32_len};
    use crate::{error::ReadError, sink::ByteSink};

    fn encode(v: u32) -> alloc::vec::Vec<u8> {
        let mut sink = ByteSink::new();
        put_var_u32(&mut sink, v);
        sink.dump()
    }

    #[test]
    fn encoded_length_table() {
        for (value, expected) in [
            (0u32, 1usize),
            (1, 1),
            (127, 1),
            (128, 2),
            (16_383, 2),
            (16_384, 3),
            (u32::MAX, MAX_VAR_U32_BYTES),
        ] {
            assert_eq!(encode(value).len(), expected, "value {value}");
            assert_eq!(var_u32_len(value), expected, "value {value}");
        }
    }

    #[test]
    fn zero_is_a_single_zero_byte() {
        assert_eq!(encode(0), [0x00]);
    }

    #[test]
    fn continuation_bits_are_set_on_all_but_the_last_byte() {
        let bytes = encode(300);
        assert_eq!(bytes, [0xAC, 0x02]);
    }

    #[test]
    fn decode_mirrors_encode() {
        for value in [0, 1, 127, 128, 16_383, 16_384, 0x0FFF_FFFF, u32::MAX] {
            let bytes = encode(value);
            assert_eq!(take_var_u32(&bytes, 0).unwrap(), (value, bytes.len()));
        }
    }

    #[test]
    fn truncated_input_is_out_of_bounds() {
        // Continuation bit set but nothing follows.
        let err = take_var_u32(&[0x80], 0).unwrap_err();
        assert!(matches!(err, ReadError::OutOfBounds { .. }));
    }

    #[test]
    fn five_continuation_bytes_are_rejected() {
        let err = take_var_u32(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x00], 0).unwrap_err();
        assert_eq!(err, ReadError::UnterminatedVarInt(0));
    }
}
