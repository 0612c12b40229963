use thiserror::Error;

/// Errors surfaced by the read side of the codec.
///
/// The write side has no recoverable failures: insufficient reserved space,
/// out-of-range patch offsets and the like are contract violations and panic.
/// Reads are bounds-checked because the bound buffer may come from an
/// untrusted producer, and a corrupt stream must fail loudly rather than
/// yield garbage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A read would run past the end of the bound buffer.
    #[error("read of {requested} bytes at offset {offset} overruns buffer of {len} bytes")]
    OutOfBounds {
        /// Cursor position at which the read was attempted.
        offset: usize,
        /// Number of bytes the read needed.
        requested: usize,
        /// Total length of the bound buffer.
        len: usize,
    },
    /// A `VarInt32` did not terminate within its five-byte budget.
    #[error("unterminated varint32 at offset {0}")]
    UnterminatedVarInt(usize),
    /// A string payload was not valid UTF-8.
    #[error("invalid UTF-8 in string payload at offset {0}")]
    InvalidUtf8(usize),
    /// A string carried an encoding tag outside the known set.
    #[error("unknown string encoding tag {0:#04x}")]
    UnknownEncodingTag(u8),
}
