//! Compact segmented list.
//!
//! Chunks keep their live elements contiguous at the front, tracked by a
//! plain count. Removing an element mid-chunk relocates the chunk's last
//! element into the hole (a per-chunk swap-remove), so iteration never has
//! to skip dead slots — but slot identity does not survive removals the
//! way it does in [`StableSegmentedList`](crate::StableSegmentedList).
//!
//! Inserts always append to the tail chunk; there is no index of partially
//! filled chunks to refill. The chain layout mirrors the stable variant:
//! a [`slab::Slab`] arena, index links with `usize::MAX` as the null
//! sentinel, and at least one chunk retained at all times.

use core::fmt;
use core::mem::MaybeUninit;

use slab::Slab;

use crate::cursor::{Cursor, NIL};

/// A fixed-capacity block with its live elements packed at the front.
struct Chunk<T, const C: usize> {
    slots: [MaybeUninit<T>; C],
    count: usize,
    prev: usize,
    next: usize,
}

impl<T, const C: usize> Chunk<T, C> {
    fn new() -> Self {
        Self {
            slots: [const { MaybeUninit::uninit() }; C],
            count: 0,
            prev: NIL,
            next: NIL,
        }
    }
}

impl<T, const C: usize> Drop for Chunk<T, C> {
    fn drop(&mut self) {
        for slot in &mut self.slots[..self.count] {
            // Safety: slots below count hold live values.
            unsafe { slot.assume_init_drop() };
        }
    }
}

/// An unordered segmented list that keeps chunks densely packed.
///
/// The leaner sibling of [`StableSegmentedList`](crate::StableSegmentedList):
/// no occupancy bitset, no hole scanning, and iteration walks contiguous
/// prefixes. The price is that a mid-chunk [`remove`](Self::remove)
/// relocates the chunk's last element, so any cursor held to that element
/// silently goes stale. Use this variant when positions are consumed
/// immediately (or only the successor cursor returned by `remove` is kept).
///
/// # Example
///
/// ```
/// use strata_collections::CompactSegmentedList;
///
/// let mut list: CompactSegmentedList<u64, 4> = CompactSegmentedList::new();
/// let a = list.insert(1);
/// list.insert(2);
/// list.insert(3);
///
/// // Removing 1 relocates 3 into its slot.
/// let (value, next) = list.remove(a);
/// assert_eq!(value, 1);
/// assert_eq!(list.get(next), Some(&3));
/// ```
pub struct CompactSegmentedList<T, const C: usize> {
    chunks: Slab<Chunk<T, C>>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T, const C: usize> CompactSegmentedList<T, C> {
    /// Creates a list holding a single empty chunk.
    pub fn new() -> Self {
        const { assert!(C > 0, "chunk capacity must be at least 1") }
        let mut chunks = Slab::new();
        let head = chunks.insert(Chunk::new());
        Self {
            chunks,
            head,
            tail: head,
            len: 0,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an element to the tail chunk and returns its position.
    ///
    /// A new chunk is linked in when the tail is full; space freed in
    /// earlier chunks is never targeted. Amortized O(1).
    pub fn insert(&mut self, value: T) -> Cursor {
        if self.chunks[self.tail].count == C {
            self.push_chunk();
        }
        let chunk = &mut self.chunks[self.tail];
        let slot = chunk.count;
        chunk.slots[slot].write(value);
        chunk.count += 1;
        self.len += 1;
        Cursor {
            chunk: self.tail,
            slot,
        }
    }

    /// Removes the element at `cursor`, returning it together with a
    /// cursor to its logical successor (or [`Cursor::end`]).
    ///
    /// Mid-chunk removal relocates the chunk's last element into the
    /// vacated slot; the returned cursor then names the relocated element,
    /// so a removal scan visits every element exactly once. Cursors held
    /// to the relocated element are invalidated. An emptied chunk is
    /// unlinked and freed unless it is the chain's last chunk.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` does not address a live element.
    pub fn remove(&mut self, cursor: Cursor) -> (T, Cursor) {
        let chunk = self
            .chunks
            .get_mut(cursor.chunk)
            .expect("cursor does not address a live chunk");
        assert!(
            cursor.slot < chunk.count,
            "cursor does not address a live element"
        );

        chunk.count -= 1;
        let last = chunk.count;
        // Safety: slot < the old count, so it holds a live value; count is
        // already decremented, so it is moved out exactly once.
        let value = unsafe { chunk.slots[cursor.slot].assume_init_read() };
        if cursor.slot != last {
            // Safety: last < the old count, so it holds a live value, and
            // the decrement above retired it from the live prefix.
            let moved = unsafe { chunk.slots[last].assume_init_read() };
            chunk.slots[cursor.slot].write(moved);
        }
        #[cfg(debug_assertions)]
        // Scrub the vacated slot so stale payloads stand out in a debugger.
        unsafe {
            core::ptr::write_bytes(chunk.slots[last].as_mut_ptr(), 0, 1);
        }

        let next = chunk.next;
        self.len -= 1;

        let successor = if last == 0 {
            if self.head != self.tail {
                self.unlink_chunk(cursor.chunk);
                self.chunks.remove(cursor.chunk);
            }
            self.normalize(Cursor {
                chunk: next,
                slot: 0,
            })
        } else if cursor.slot < last {
            // The relocated element now occupies the removed one's slot.
            cursor
        } else {
            self.normalize(Cursor {
                chunk: next,
                slot: 0,
            })
        };

        (value, successor)
    }

    /// Returns the element at `cursor`, or `None` if the cursor is the end
    /// sentinel or no longer addresses a live slot.
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        let chunk = self.chunks.get(cursor.chunk)?;
        if cursor.slot < chunk.count {
            // Safety: slots below count hold live values.
            Some(unsafe { chunk.slots[cursor.slot].assume_init_ref() })
        } else {
            None
        }
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        let chunk = self.chunks.get_mut(cursor.chunk)?;
        if cursor.slot < chunk.count {
            // Safety: slots below count hold live values.
            Some(unsafe { chunk.slots[cursor.slot].assume_init_mut() })
        } else {
            None
        }
    }

    /// Returns a cursor to the first live element, or [`Cursor::end`] if
    /// the list is empty.
    pub fn cursor_front(&self) -> Cursor {
        self.normalize(Cursor {
            chunk: self.head,
            slot: 0,
        })
    }

    /// Advances a cursor to the next live element, crossing chunk
    /// boundaries. The end sentinel stays put.
    ///
    /// `cursor` must be the end sentinel or a currently valid position.
    pub fn next_cursor(&self, cursor: Cursor) -> Cursor {
        if cursor.is_end() {
            return Cursor::end();
        }
        self.normalize(Cursor {
            chunk: cursor.chunk,
            slot: cursor.slot + 1,
        })
    }

    /// Returns a forward iterator over the live elements.
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            list: self,
            cursor: self.cursor_front(),
            remaining: self.len,
        }
    }

    /// Drops every element and resets the chain to a single empty chunk.
    pub fn clear(&mut self) {
        self.chunks.clear();
        let head = self.chunks.insert(Chunk::new());
        self.head = head;
        self.tail = head;
        self.len = 0;
    }

    // ========================================================================
    // Chain maintenance
    // ========================================================================

    /// Appends a fresh chunk after the tail.
    fn push_chunk(&mut self) -> usize {
        let id = self.chunks.insert(Chunk::new());
        self.chunks[id].prev = self.tail;
        self.chunks[self.tail].next = id;
        self.tail = id;
        id
    }

    /// Unlinks a chunk from the chain, fixing head/tail as needed.
    fn unlink_chunk(&mut self, id: usize) {
        let (prev, next) = {
            let chunk = &self.chunks[id];
            (chunk.prev, chunk.next)
        };
        if prev != NIL {
            self.chunks[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.chunks[next].prev = prev;
        } else {
            self.tail = prev;
        }
    }

    /// Advances `cursor` to the first live slot at or after its position,
    /// or to the end sentinel.
    fn normalize(&self, mut cursor: Cursor) -> Cursor {
        while cursor.chunk != NIL {
            let chunk = &self.chunks[cursor.chunk];
            if cursor.slot < chunk.count {
                return cursor;
            }
            cursor = Cursor {
                chunk: chunk.next,
                slot: 0,
            };
        }
        Cursor::end()
    }
}

impl<T, const C: usize> Default for CompactSegmentedList<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const C: usize> fmt::Debug for CompactSegmentedList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Forward iterator over a [`CompactSegmentedList`].
pub struct Iter<'a, T, const C: usize> {
    list: &'a CompactSegmentedList<T, C>,
    cursor: Cursor,
    remaining: usize,
}

impl<'a, T, const C: usize> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cursor.is_end() {
            return None;
        }
        let item = self.list.get(self.cursor)?;
        self.cursor = self.list.next_cursor(self.cursor);
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const C: usize> ExactSizeIterator for Iter<'_, T, C> {}

impl<'a, T, const C: usize> IntoIterator for &'a CompactSegmentedList<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
