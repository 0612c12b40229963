//! Dual-path string codec.
//!
//! Strings travel as a `VarInt32` byte-length prefix followed by the payload,
//! optionally preceded by a one-byte tag when mixed-encoding mode is enabled:
//!
//! - [`LATIN1`]: one byte per character; valid only when every code point is
//!   `<= U+00FF`.
//! - [`UTF8`]: the standard multi-byte transformation, 1–4 bytes per code
//!   point.
//!
//! The length prefix is always the *encoded byte length*, which for the
//! single-byte path equals the character count.
//!
//! Alongside the `&str` paths used by the writer, this module exposes a
//! UTF-16 code-unit transcoder ([`encode_units`] / [`decode_units`]) matching
//! the cross-language format's leniency: a lone surrogate is encoded as a
//! plain three-byte sequence rather than rejected. Rust strings cannot carry
//! lone surrogates, so that branch is reachable only through the unit-level
//! API; it exists for producers bridging UTF-16 runtimes.

#![expect(clippy::cast_possible_truncation)]

use alloc::{string::String, vec::Vec};

use crate::{error::ReadError, sink::ByteSink};

/// Encoding tag for single-byte (Latin-1) string payloads.
pub const LATIN1: u8 = 0;

/// Encoding tag for multi-byte (UTF-8) string payloads.
pub const UTF8: u8 = 1;

/// Payloads below this many encoded bytes go through the scalar per-code-point
/// encoder; longer ones amortize better as a single bulk copy.
pub(crate) const BULK_THRESHOLD: usize = 40;

/// UTF-16 code-unit count of `s`; the single-byte payload length when `s` is
/// single-byte-encodable.
#[inline]
pub(crate) fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Generic single-byte classification: the UTF-8 byte length equals the
/// UTF-16 code-unit count only when every unit is ASCII.
///
/// Conservative by construction — non-ASCII Latin-1 text falls through to the
/// multi-byte path, which is always correct, just one byte wider per
/// character. Full Latin-1 detection needs the injected classifier.
#[inline]
pub(crate) fn classify_generic(s: &str) -> bool {
    s.len() == utf16_len(s)
}

/// Writes the single-byte payload of `s` into reserved sink space.
///
/// Caller contract: every code point of `s` is `<= U+00FF`, `len` is the
/// character count, and `len` bytes were reserved.
pub(crate) fn put_latin1(sink: &mut ByteSink, s: &str, len: usize) {
    let dst = sink.claim(len);
    if len < BULK_THRESHOLD {
        for (slot, c) in dst.iter_mut().zip(s.chars()) {
            *slot = c as u8;
        }
    } else {
        // Generic classification only admits ASCII, so the UTF-8 bytes
        // already are the single-byte payload.
        dst.copy_from_slice(s.as_bytes());
    }
}

/// Writes the multi-byte payload of `s` into reserved sink space.
///
/// Caller contract: `s.len()` bytes were reserved.
pub(crate) fn put_utf8(sink: &mut ByteSink, s: &str) {
    let dst = sink.claim(s.len());
    if s.len() < BULK_THRESHOLD {
        let mut offset = 0;
        for c in s.chars() {
            offset += c.encode_utf8(&mut dst[offset..]).len();
        }
    } else {
        dst.copy_from_slice(s.as_bytes());
    }
}

/// Decodes a single-byte payload back into a string.
pub(crate) fn get_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decodes a multi-byte payload back into a string.
///
/// Strict: payloads that are not valid UTF-8 (including encoded lone
/// surrogates, which a Rust `String` cannot hold) fail with
/// [`ReadError::InvalidUtf8`] carrying `offset`, the payload's position in
/// the stream.
pub(crate) fn get_utf8(bytes: &[u8], offset: usize) -> Result<String, ReadError> {
    core::str::from_utf8(bytes)
        .map(String::from)
        .map_err(|_| ReadError::InvalidUtf8(offset))
}

/// Encoded byte length of a UTF-16 code-unit sequence under [`encode_units`].
#[must_use]
pub fn encoded_units_len(units: &[u16]) -> usize {
    let mut len = 0;
    let mut i = 0;
    while i < units.len() {
        let u = units[i];
        i += 1;
        len += if u < 0x80 {
            1
        } else if u < 0x800 {
            2
        } else if is_high_surrogate(u) && i < units.len() && is_low_surrogate(units[i]) {
            i += 1;
            4
        } else {
            3
        };
    }
    len
}

/// Transcodes UTF-16 code units into the wire's multi-byte form, appending to
/// `out`.
///
/// A valid high/low surrogate pair combines into one four-byte sequence. A
/// lone surrogate is *not* rejected: it is encoded as a standalone three-byte
/// sequence, preserving the cross-language format's leniency for producers
/// whose source text is assumed well-formed. [`decode_units`] reproduces the
/// same sequence of units, so the unit-level codec is round-trip-lossless
/// even for malformed input.
pub fn encode_units(units: &[u16], out: &mut Vec<u8>) {
    out.reserve(units.len() * 3);
    let mut i = 0;
    while i < units.len() {
        let u = units[i];
        i += 1;
        if u < 0x80 {
            out.push(u as u8);
        } else if u < 0x800 {
            out.push((u >> 6) as u8 | 0xC0);
            out.push((u as u8 & 0x3F) | 0x80);
        } else if is_high_surrogate(u) && i < units.len() && is_low_surrogate(units[i]) {
            let low = units[i];
            i += 1;
            let cp = 0x10000 + ((u32::from(u & 0x03FF) << 10) | u32::from(low & 0x03FF));
            out.push((cp >> 18) as u8 | 0xF0);
            out.push(((cp >> 12) as u8 & 0x3F) | 0x80);
            out.push(((cp >> 6) as u8 & 0x3F) | 0x80);
            out.push((cp as u8 & 0x3F) | 0x80);
        } else {
            // Unpaired surrogates land here and encode like any other BMP
            // unit: observed cross-language behavior, kept as-is.
            out.push((u >> 12) as u8 | 0xE0);
            out.push(((u >> 6) as u8 & 0x3F) | 0x80);
            out.push((u as u8 & 0x3F) | 0x80);
        }
    }
}

/// Inverse of [`encode_units`]: transcodes multi-byte payload bytes back into
/// UTF-16 code units, appending to `out`.
///
/// Mirrors the encoder's leniency — a three-byte sequence in the surrogate
/// range decodes to the lone unit it came from. Structurally broken input
/// (truncated sequences, stray continuation bytes, code points past
/// U+10FFFF) fails with [`ReadError::InvalidUtf8`] carrying the byte offset
/// within `bytes`.
pub fn decode_units(bytes: &[u8], out: &mut Vec<u16>) -> Result<(), ReadError> {
    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i];
        let tail_len = match b0 {
            0x00..=0x7F => 0,
            0xC0..=0xDF => 1,
            0xE0..=0xEF => 2,
            0xF0..=0xF7 => 3,
            _ => return Err(ReadError::InvalidUtf8(i)),
        };
        let Some(tail) = bytes.get(i + 1..=i + tail_len) else {
            return Err(ReadError::InvalidUtf8(i));
        };
        if tail.iter().any(|&b| b & 0xC0 != 0x80) {
            return Err(ReadError::InvalidUtf8(i));
        }
        match tail_len {
            0 => out.push(u16::from(b0)),
            1 => out.push((u16::from(b0 & 0x1F) << 6) | u16::from(tail[0] & 0x3F)),
            2 => out.push(
                (u16::from(b0 & 0x0F) << 12)
                    | (u16::from(tail[0] & 0x3F) << 6)
                    | u16::from(tail[1] & 0x3F),
            ),
            _ => {
                let cp = (u32::from(b0 & 0x07) << 18)
                    | (u32::from(tail[0] & 0x3F) << 12)
                    | (u32::from(tail[1] & 0x3F) << 6)
                    | u32::from(tail[2] & 0x3F);
                if cp < 0x10000 || cp > 0x10_FFFF {
                    return Err(ReadError::InvalidUtf8(i));
                }
                let cp = cp - 0x10000;
                out.push(0xD800 | (cp >> 10) as u16);
                out.push(0xDC00 | (cp as u16 & 0x03FF));
            }
        }
        i += 1 + tail_len;
    }
    Ok(())
}

#[inline]
fn is_high_surrogate(u: u16) -> bool {
    (0xD800..0xDC00).contains(&u)
}

#[inline]
fn is_low_surrogate(u: u16) -> bool {
    (0xDC00..0xE000).contains(&u)
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use super::{classify_generic, decode_units, encode_units, encoded_units_len, get_latin1};
    use crate::error::ReadError;

    fn encoded(units: &[u16]) -> Vec<u8> {
        let mut out = Vec::new();
        encode_units(units, &mut out);
        out
    }

    #[test]
    fn classification_admits_ascii_only() {
        assert!(classify_generic(""));
        assert!(classify_generic("plain ascii"));
        // Latin-1 but not ASCII: the generic path is conservative.
        assert!(!classify_generic("café"));
        assert!(!classify_generic("日本語"));
    }

    #[test]
    fn unit_encoder_matches_std_utf8_for_well_formed_text() {
        for s in ["", "ascii", "café", "日本語テスト", "🦀 and 𝄞"] {
            let units: Vec<u16> = s.encode_utf16().collect();
            assert_eq!(encoded(&units), s.as_bytes(), "string {s:?}");
            assert_eq!(encoded_units_len(&units), s.len(), "string {s:?}");
        }
    }

    #[test]
    fn surrogate_pair_becomes_one_four_byte_sequence() {
        // U+1D11E MUSICAL SYMBOL G CLEF
        let units = [0xD834, 0xDD1E];
        assert_eq!(encoded(&units), "𝄞".as_bytes());
        assert_eq!(encoded_units_len(&units), 4);
    }

    #[test]
    fn lone_high_surrogate_is_encoded_not_rejected() {
        // Observed cross-language behavior: a lone surrogate is written as a
        // plain three-byte sequence. Flagged here rather than "fixed".
        let bytes = encoded(&[0xD834]);
        assert_eq!(bytes, [0xED, 0xA0, 0xB4]);
        let mut back = Vec::new();
        decode_units(&bytes, &mut back).unwrap();
        assert_eq!(back, [0xD834]);
    }

    #[test]
    fn lone_high_surrogate_before_non_low_unit_stays_lone() {
        let bytes = encoded(&[0xD834, 0x0041]);
        assert_eq!(bytes, [0xED, 0xA0, 0xB4, 0x41]);
        let mut back = Vec::new();
        decode_units(&bytes, &mut back).unwrap();
        assert_eq!(back, [0xD834, 0x0041]);
    }

    #[test]
    fn decode_splits_supplementary_back_into_a_pair() {
        let mut back = Vec::new();
        decode_units("🦀".as_bytes(), &mut back).unwrap();
        assert_eq!(back, [0xD83E, 0xDD80]);
    }

    #[test]
    fn decode_rejects_truncated_sequences() {
        let mut out = Vec::new();
        assert_eq!(
            decode_units(&[0xE3, 0x81], &mut out),
            Err(ReadError::InvalidUtf8(0))
        );
        assert_eq!(
            decode_units(&[0x41, 0xF0, 0x9F], &mut out),
            Err(ReadError::InvalidUtf8(1))
        );
        assert_eq!(
            decode_units(&[0xFF], &mut out),
            Err(ReadError::InvalidUtf8(0))
        );
    }

    #[test]
    fn latin1_decode_maps_bytes_to_code_points() {
        let s = get_latin1(&[0x63, 0x61, 0x66, 0xE9]);
        assert_eq!(s, String::from("café"));
    }
}
