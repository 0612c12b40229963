//! Growable little-endian output buffer.
//!
//! [`ByteSink`] is the allocation/growth/reuse primitive everything else
//! builds on. It owns its backing storage exclusively; snapshots taken with
//! [`ByteSink::dump`] are independent copies, never aliases, so the sink can
//! be reused for the next encode session without lifetime coupling to
//! previously produced output.
//!
//! Fixed-width writes do not bounds-check individually: callers are expected
//! to stay within the initial allocation or to have called
//! [`ByteSink::reserve`] for variable-sized regions. A violated contract
//! panics on the slice index rather than corrupting memory.

#![expect(clippy::inline_always)]
#![expect(clippy::cast_sign_loss)]

use alloc::{vec, vec::Vec};

/// Capacity of a fresh sink; also the capacity restored when a pooled buffer
/// is released after outgrowing [`MAX_POOL_CAPACITY`].
pub(crate) const DEFAULT_CAPACITY: usize = 100 * 1024;

/// High-water mark above which `reset`/`dump` discard the backing buffer
/// instead of retaining it, bounding long-run memory held by a pooled writer.
pub(crate) const MAX_POOL_CAPACITY: usize = 3 * 1024 * 1024;

/// An owned, growable, contiguous byte buffer with a write cursor.
///
/// The buffer is kept at full length (capacity == `buf.len()`) and
/// zero-initialized so that writes are plain slice stores. `cursor` is the
/// next write offset and only moves forward, except for [`ByteSink::reset`];
/// `reserved` accumulates promised-but-unwritten bytes between resets. The
/// invariant `cursor + reserved <= capacity` is restored by growth before any
/// reserved write proceeds.
#[derive(Debug)]
pub struct ByteSink {
    buf: Vec<u8>,
    cursor: usize,
    reserved: usize,
}

impl Default for ByteSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSink {
    /// Creates a sink with the default 100 KiB pooled capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a sink with an explicit initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            cursor: 0,
            reserved: 0,
        }
    }

    /// Guarantees at least `n` more bytes are writable from the cursor.
    ///
    /// Reservations are cumulative between resets, so a batch of writes can
    /// reserve its total up front and then write without further checks.
    /// Growth copies the live prefix `[0, cursor)` and never shrinks.
    pub fn reserve(&mut self, n: usize) {
        self.reserved += n;
        if self.buf.len() - self.cursor <= self.reserved {
            let required = self.cursor + self.reserved;
            self.grow(core::cmp::max(self.buf.len() * 2 + n, required));
        }
    }

    fn grow(&mut self, new_capacity: usize) {
        let mut next = vec![0; new_capacity];
        next[..self.cursor].copy_from_slice(&self.buf[..self.cursor]);
        self.buf = next;
    }

    /// Rewinds the cursor and the cumulative reservation to zero, retaining
    /// the backing storage for the next session unless it outgrew the pool
    /// high-water mark, in which case a fresh default-sized buffer replaces
    /// it.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.reserved = 0;
        self.try_release_pool();
    }

    /// Returns an independently owned copy of the written region
    /// `[0, cursor)`.
    ///
    /// Also applies the pool high-water check so the next session starts
    /// clean; if the buffer is released, the sink comes back empty.
    #[must_use]
    pub fn dump(&mut self) -> Vec<u8> {
        let out = self.buf[..self.cursor].to_vec();
        self.try_release_pool();
        out
    }

    /// Releasing the pool implies an empty sink: a shrunken buffer must not
    /// be left holding a cursor beyond its end.
    fn try_release_pool(&mut self) {
        if self.buf.len() > MAX_POOL_CAPACITY {
            self.buf = vec![0; DEFAULT_CAPACITY];
            self.cursor = 0;
            self.reserved = 0;
        }
    }

    /// Advances the cursor by `len` without writing, leaving a hole for a
    /// later patch via [`ByteSink::set_u32_at`].
    #[inline]
    pub fn skip(&mut self, len: usize) {
        self.cursor += len;
    }

    /// Patches a previously written (or skipped) 4-byte little-endian field
    /// in place. The cursor does not move.
    ///
    /// Contract: `offset + 4 <= cursor`, i.e. the target lies entirely within
    /// the written region.
    #[inline]
    pub fn set_u32_at(&mut self, offset: usize, v: u32) {
        debug_assert!(offset + 4 <= self.cursor);
        self.buf[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
    }

    /// Copies a pre-validated span directly into the sink, skipping capacity
    /// checks. Caller contract: the span's length was already reserved.
    #[inline]
    pub fn put_bytes_unchecked(&mut self, bytes: &[u8]) {
        self.buf[self.cursor..self.cursor + bytes.len()].copy_from_slice(bytes);
        self.cursor += bytes.len();
    }

    /// Splices an arbitrary byte run into the stream, growing as needed.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        self.put_bytes_unchecked(bytes);
    }

    /// Claims `len` bytes at the cursor and advances past them, handing the
    /// region to the caller to fill. Caller contract: `len` was reserved.
    #[inline]
    pub(crate) fn claim(&mut self, len: usize) -> &mut [u8] {
        let start = self.cursor;
        self.cursor += len;
        &mut self.buf[start..self.cursor]
    }

    /// Writes one byte.
    #[inline(always)]
    pub fn put_u8(&mut self, v: u8) {
        self.buf[self.cursor] = v;
        self.cursor += 1;
    }

    /// Writes one signed byte.
    #[inline(always)]
    pub fn put_i8(&mut self, v: i8) {
        self.put_u8(v as u8);
    }

    /// Writes a `u16`, little-endian.
    #[inline(always)]
    pub fn put_u16(&mut self, v: u16) {
        self.put_fixed(v.to_le_bytes());
    }

    /// Writes an `i16`, little-endian.
    #[inline(always)]
    pub fn put_i16(&mut self, v: i16) {
        self.put_fixed(v.to_le_bytes());
    }

    /// Writes the low 24 bits of `v` as three little-endian bytes.
    ///
    /// Exactly three bytes land in the stream; nothing is ever written past
    /// the logical cursor, so an `i24` is safe as the final field before
    /// [`ByteSink::dump`].
    #[inline(always)]
    pub fn put_i24(&mut self, v: i32) {
        let le = v.to_le_bytes();
        self.put_fixed([le[0], le[1], le[2]]);
    }

    /// Writes a `u32`, little-endian.
    #[inline(always)]
    pub fn put_u32(&mut self, v: u32) {
        self.put_fixed(v.to_le_bytes());
    }

    /// Writes an `i32`, little-endian.
    #[inline(always)]
    pub fn put_i32(&mut self, v: i32) {
        self.put_fixed(v.to_le_bytes());
    }

    /// Writes a `u64`, little-endian.
    #[inline(always)]
    pub fn put_u64(&mut self, v: u64) {
        self.put_fixed(v.to_le_bytes());
    }

    /// Writes an `i64`, little-endian.
    #[inline(always)]
    pub fn put_i64(&mut self, v: i64) {
        self.put_fixed(v.to_le_bytes());
    }

    /// Writes an `f32`, little-endian IEEE 754.
    #[inline(always)]
    pub fn put_f32(&mut self, v: f32) {
        self.put_fixed(v.to_le_bytes());
    }

    /// Writes an `f64`, little-endian IEEE 754.
    #[inline(always)]
    pub fn put_f64(&mut self, v: f64) {
        self.put_fixed(v.to_le_bytes());
    }

    #[inline(always)]
    fn put_fixed<const N: usize>(&mut self, bytes: [u8; N]) {
        self.buf[self.cursor..self.cursor + N].copy_from_slice(&bytes);
        self.cursor += N;
    }

    /// Next write offset.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cumulative bytes promised via [`ByteSink::reserve`] since the last
    /// reset.
    #[must_use]
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    /// Current capacity of the backing buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Borrowed view of the written region `[0, cursor)`.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteSink, DEFAULT_CAPACITY, MAX_POOL_CAPACITY};

    #[test]
    fn fixed_width_writes_are_little_endian() {
        let mut sink = ByteSink::new();
        sink.put_u16(0x0203);
        sink.put_i32(-2);
        sink.put_u64(0x0102_0304_0506_0708);
        assert_eq!(
            sink.written(),
            [
                0x03, 0x02, //
                0xFE, 0xFF, 0xFF, 0xFF, //
                0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01,
            ]
        );
    }

    #[test]
    fn i24_writes_exactly_three_bytes() {
        let mut sink = ByteSink::new();
        sink.put_i24(0x00AA_BBCC);
        assert_eq!(sink.cursor(), 3);
        assert_eq!(sink.written(), [0xCC, 0xBB, 0xAA]);
        // As the very last field, dump must return exactly the three bytes.
        assert_eq!(sink.dump(), [0xCC, 0xBB, 0xAA]);
    }

    #[test]
    fn growth_preserves_written_prefix() {
        let mut sink = ByteSink::with_capacity(16);
        sink.put_u32(0xDEAD_BEEF);
        sink.reserve(64);
        assert!(sink.capacity() >= 4 + 64);
        sink.put_bytes_unchecked(&[0xAB; 64]);
        let out = sink.dump();
        assert_eq!(&out[..4], [0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(&out[4..], [0xAB; 64].as_slice());
    }

    #[test]
    fn reservations_accumulate_until_reset() {
        let mut sink = ByteSink::with_capacity(32);
        sink.reserve(8);
        sink.reserve(8);
        assert_eq!(sink.reserved(), 16);
        sink.reset();
        assert_eq!(sink.reserved(), 0);
        assert_eq!(sink.cursor(), 0);
    }

    #[test]
    fn reset_retains_grown_buffer_below_high_water_mark() {
        let mut sink = ByteSink::new();
        sink.put_bytes(&alloc::vec![0u8; 2 * DEFAULT_CAPACITY]);
        let grown = sink.capacity();
        assert!(grown > DEFAULT_CAPACITY);
        sink.reset();
        assert_eq!(sink.capacity(), grown);
    }

    #[test]
    fn dump_releases_buffer_beyond_high_water_mark() {
        let mut sink = ByteSink::new();
        sink.put_bytes(&alloc::vec![0x5A; MAX_POOL_CAPACITY + 1]);
        assert!(sink.capacity() > MAX_POOL_CAPACITY);
        let out = sink.dump();
        assert_eq!(out.len(), MAX_POOL_CAPACITY + 1);
        assert_eq!(sink.capacity(), DEFAULT_CAPACITY);
        assert_eq!(sink.cursor(), 0);
    }

    #[test]
    fn skip_and_backpatch() {
        let mut sink = ByteSink::new();
        sink.skip(4);
        sink.put_u8(0x11);
        sink.set_u32_at(0, 0x4433_2211);
        assert_eq!(sink.written(), [0x11, 0x22, 0x33, 0x44, 0x11]);
    }

    #[test]
    fn dump_is_an_independent_copy() {
        let mut sink = ByteSink::new();
        sink.put_u8(1);
        let out = sink.dump();
        sink.reset();
        sink.put_u8(2);
        assert_eq!(out, [1]);
    }
}
