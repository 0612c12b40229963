//! Reference-header packing.
//!
//! The object-graph layers above this crate prefix every value with a small
//! header: one flag byte saying whether the value is null, inline, the first
//! occurrence of a shared reference, or a back-reference, followed by a
//! 16-bit type identifier. On the write side the two fields are packed into
//! one 24-bit word and emitted with a single
//! [`Writer::write_i24`](crate::Writer::write_i24); the read side consumes
//! them as two separate wire fields, an `i8` then an `i16`.

/// Per-value reference flag, the low byte of the header word.
///
/// The discriminants are wire values shared across language implementations
/// of the format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum RefFlag {
    /// The value is null; no payload follows.
    Null = -3,
    /// Back-reference to a previously written value; a reference id follows.
    Ref = -2,
    /// Non-null inline value that will never be referenced again.
    NotNullValue = -1,
    /// First occurrence of a referencable value.
    RefValue = 0,
}

impl RefFlag {
    /// All flags, in wire-value order.
    pub const ALL: [RefFlag; 4] = [
        RefFlag::Null,
        RefFlag::Ref,
        RefFlag::NotNullValue,
        RefFlag::RefValue,
    ];

    /// Maps a flag byte read off the wire back to the enumeration.
    #[must_use]
    pub fn from_i8(v: i8) -> Option<Self> {
        match v {
            -3 => Some(RefFlag::Null),
            -2 => Some(RefFlag::Ref),
            -1 => Some(RefFlag::NotNullValue),
            0 => Some(RefFlag::RefValue),
            _ => None,
        }
    }
}

/// Packs `flag` into the low 8 bits and `type_id` into bits 8–23 of a header
/// word to be written via a 3-byte `i24`.
#[must_use]
pub fn make_head(flag: RefFlag, type_id: u16) -> i32 {
    (i32::from(type_id) << 8) | i32::from(flag as i8 as u8)
}

/// Inverse of [`make_head`]: recovers the flag byte (sign-extended) and the
/// type identifier from a header word.
///
/// Returns the raw flag byte rather than a [`RefFlag`] so that decode-side
/// callers can route unknown flags through [`RefFlag::from_i8`] themselves.
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_head(head: i32) -> (i8, u16) {
    (head as u8 as i8, (head >> 8) as u16)
}
