use alloc::boxed::Box;
use core::fmt;

/// Injectable fast-path string operations.
///
/// Runtimes that keep strings in a single-byte representation internally can
/// classify and copy them much faster than the generic length comparison. The
/// capability is injected at [`Writer`](crate::Writer) construction time and
/// resolved once into a strategy, never re-checked per call.
pub trait FastStringOps {
    /// Returns `true` iff every code point of `s` is `<= U+00FF`, i.e. the
    /// string is single-byte-encodable.
    fn is_latin1(&self, s: &str) -> bool;

    /// Copies `s` into `dst` at one byte per character.
    ///
    /// Callers guarantee `is_latin1(s)` holds and `dst` is exactly the
    /// character count of `s`.
    fn latin1_copy(&self, s: &str, dst: &mut [u8]);

    /// Bulk-transcodes `s` into `dst` as UTF-8.
    ///
    /// `dst` is exactly `s.len()` bytes. The default is a plain copy, which
    /// is already optimal for Rust strings; implementations only override
    /// this when bridging a foreign string representation.
    fn utf8_copy(&self, s: &str, dst: &mut [u8]) {
        dst.copy_from_slice(s.as_bytes());
    }
}

/// Configuration for a [`Writer`](crate::Writer).
///
/// Consumed once at construction; a writer never re-reads its options per
/// call.
#[derive(Default)]
pub struct WriterOptions {
    /// Whether to prefix each string with a one-byte encoding tag
    /// ([`LATIN1`](crate::LATIN1) or [`UTF8`](crate::UTF8)).
    ///
    /// When `false`, every string is written as untagged UTF-8 and the
    /// single-byte fast path is never taken. Readers must be constructed
    /// with the matching [`ReaderOptions::encoding_tag`].
    ///
    /// # Default
    ///
    /// `false`
    pub encoding_tag: bool,

    /// Optional accelerated string classification and bulk copy.
    ///
    /// When absent, single-byte-encodability is computed by comparing the
    /// UTF-8 byte length against the UTF-16 code-unit count.
    ///
    /// # Default
    ///
    /// `None`
    pub fast_string_ops: Option<Box<dyn FastStringOps>>,
}

impl fmt::Debug for WriterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterOptions")
            .field("encoding_tag", &self.encoding_tag)
            .field("fast_string_ops", &self.fast_string_ops.is_some())
            .finish()
    }
}

/// Configuration for a [`Reader`](crate::Reader).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderOptions {
    /// Whether strings in the stream carry a one-byte encoding tag.
    ///
    /// Must match the writer that produced the stream.
    ///
    /// # Default
    ///
    /// `false`
    pub encoding_tag: bool,
}
