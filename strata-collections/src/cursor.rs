//! Cursor positions shared by both list variants.

/// Sentinel chunk index meaning "no chunk".
pub(crate) const NIL: usize = usize::MAX;

/// A copyable position inside a segmented list.
///
/// A cursor names a `(chunk, slot)` pair. It owns nothing: removing the
/// element (or chunk) it points at invalidates it, except that
/// [`remove`](crate::StableSegmentedList::remove) hands back a fresh
/// successor cursor so removal scans compose. Because chunk indices are
/// reused after a chunk is freed, a stale cursor may later name a
/// *different* element; access through a stale cursor is memory-safe but
/// yields `None` or an unrelated value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub(crate) chunk: usize,
    pub(crate) slot: usize,
}

impl Cursor {
    /// The end sentinel, one past the last element of any list.
    #[inline]
    pub const fn end() -> Self {
        Self { chunk: NIL, slot: 0 }
    }

    /// Returns `true` if this cursor is the end sentinel.
    #[inline]
    pub const fn is_end(&self) -> bool {
        self.chunk == NIL
    }
}
