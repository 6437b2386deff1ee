//! Address-stable segmented list.
//!
//! Chunks carry a validity bitset, so removing an element leaves a hole
//! instead of moving its neighbors: a live element's `(chunk, slot)`
//! position never changes due to unrelated inserts or removes. Holes are
//! reused before the chain grows, via an intrusive FIFO of partially
//! filled chunks threaded through the chunks themselves.
//!
//! # Storage
//!
//! Chunks live in a [`slab::Slab`] arena and link to their neighbors by
//! index, with `usize::MAX` as the null sentinel. Forward links define the
//! chain; backward links exist only to make unlinking a chunk O(1). The
//! chain always holds at least one chunk, even when the list is empty.

use core::fmt;
use core::mem::MaybeUninit;

use slab::Slab;
use strata_bits::{CompactBitset, Word};

use crate::cursor::{Cursor, NIL};

/// A fixed-capacity block of slots with occupancy tracked by bitset.
///
/// The `inc_*` pair threads the chunk through a second, intrusive list:
/// the FIFO of incomplete (partially filled) chunks.
struct Chunk<T, const C: usize, W: Word, const WORDS: usize> {
    slots: [MaybeUninit<T>; C],
    live: CompactBitset<C, W, WORDS>,
    prev: usize,
    next: usize,
    inc_prev: usize,
    inc_next: usize,
}

impl<T, const C: usize, W: Word, const WORDS: usize> Chunk<T, C, W, WORDS> {
    fn new() -> Self {
        Self {
            slots: [const { MaybeUninit::uninit() }; C],
            live: CompactBitset::new(),
            prev: NIL,
            next: NIL,
            inc_prev: NIL,
            inc_next: NIL,
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.live.all()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.live.none()
    }
}

impl<T, const C: usize, W: Word, const WORDS: usize> Drop for Chunk<T, C, W, WORDS> {
    fn drop(&mut self) {
        for i in 0..C {
            if self.live.test(i) {
                // Safety: a set validity bit means slot i holds a live value.
                unsafe { self.slots[i].assume_init_drop() };
            }
        }
    }
}

/// An unordered segmented list that never moves a live element.
///
/// `C` is the chunk capacity; `W`/`WORDS` shape the per-chunk occupancy
/// bitset exactly as in [`CompactBitset`] (the defaults cover `C <= 64`).
///
/// Insertion fills holes left by earlier removals before appending new
/// chunks, keeping memory overhead bounded; both insert and remove are
/// amortized O(1). See [`CompactSegmentedList`](crate::CompactSegmentedList)
/// for the faster variant that trades away slot identity.
///
/// # Example
///
/// ```
/// use strata_collections::StableSegmentedList;
///
/// let mut list: StableSegmentedList<u64, 4> = StableSegmentedList::new();
/// let a = list.insert(1);
/// let b = list.insert(2);
///
/// let (value, _next) = list.remove(a);
/// assert_eq!(value, 1);
/// assert_eq!(list.get(b), Some(&2));
///
/// // b's position survived a's removal.
/// list.insert(3);
/// assert_eq!(list.get(b), Some(&2));
/// ```
pub struct StableSegmentedList<T, const C: usize, W: Word = u64, const WORDS: usize = 1> {
    chunks: Slab<Chunk<T, C, W, WORDS>>,
    head: usize,
    tail: usize,
    incomplete_head: usize,
    incomplete_tail: usize,
    len: usize,
}

impl<T, const C: usize, W: Word, const WORDS: usize> StableSegmentedList<T, C, W, WORDS> {
    /// Creates a list holding a single empty chunk.
    pub fn new() -> Self {
        const { assert!(C > 0, "chunk capacity must be at least 1") }
        let mut chunks = Slab::new();
        let head = chunks.insert(Chunk::new());
        Self {
            chunks,
            head,
            tail: head,
            incomplete_head: NIL,
            incomplete_tail: NIL,
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

    /// Inserts an element and returns its position.
    ///
    /// Destination priority: the oldest incomplete chunk, then the tail
    /// chunk if it has a free slot, then a freshly appended chunk. Holes
    /// are therefore reused before the chain grows. Amortized O(1).
    pub fn insert(&mut self, value: T) -> Cursor {
        let target = if self.incomplete_head != NIL {
            self.incomplete_head
        } else {
            if self.chunks[self.tail].is_full() {
                self.push_chunk();
            }
            self.tail
        };

        let slot = {
            let chunk = &mut self.chunks[target];
            let slot = chunk.live.first_zero();
            chunk.slots[slot].write(value);
            chunk.live.set(slot, true);
            slot
        };
        self.len += 1;

        if self.chunks[target].is_full() {
            self.incomplete_unlink(target);
        }

        Cursor { chunk: target, slot }
    }

    /// Removes the element at `cursor`, returning it together with a
    /// cursor to its logical successor (or [`Cursor::end`]).
    ///
    /// If this empties the chunk, the chunk is unlinked and freed — unless
    /// it is the chain's last chunk, which is always retained. The returned
    /// cursor is already advanced past any holes, so a removal scan can
    /// feed it straight back in.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` does not address a live element (including the
    /// end sentinel and cursors invalidated by an earlier removal).
    pub fn remove(&mut self, cursor: Cursor) -> (T, Cursor) {
        let chunk = self
            .chunks
            .get_mut(cursor.chunk)
            .expect("cursor does not address a live chunk");
        assert!(
            cursor.slot < C && chunk.live.test(cursor.slot),
            "cursor does not address a live element"
        );

        chunk.live.set(cursor.slot, false);
        // Safety: the validity bit was set, so the slot holds a live value;
        // the bit is already cleared, so it is moved out exactly once.
        let value = unsafe { chunk.slots[cursor.slot].assume_init_read() };
        #[cfg(debug_assertions)]
        // Scrub the vacated slot so stale payloads stand out in a debugger.
        unsafe {
            core::ptr::write_bytes(chunk.slots[cursor.slot].as_mut_ptr(), 0, 1);
        }

        let emptied = chunk.is_empty();
        let next = chunk.next;
        self.len -= 1;

        let successor = if emptied {
            self.incomplete_unlink(cursor.chunk);
            if self.head != self.tail {
                self.unlink_chunk(cursor.chunk);
                self.chunks.remove(cursor.chunk);
            }
            self.normalize(Cursor {
                chunk: next,
                slot: 0,
            })
        } else {
            if !self.in_incomplete(cursor.chunk) {
                self.incomplete_push(cursor.chunk);
            }
            self.normalize(Cursor {
                chunk: cursor.chunk,
                slot: cursor.slot + 1,
            })
        };

        (value, successor)
    }

    /// Returns the element at `cursor`, or `None` if the cursor is the end
    /// sentinel or no longer addresses a live slot.
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        let chunk = self.chunks.get(cursor.chunk)?;
        if cursor.slot < C && chunk.live.test(cursor.slot) {
            // Safety: the validity bit gates initialization of the slot.
            Some(unsafe { chunk.slots[cursor.slot].assume_init_ref() })
        } else {
            None
        }
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        let chunk = self.chunks.get_mut(cursor.chunk)?;
        if cursor.slot < C && chunk.live.test(cursor.slot) {
            // Safety: the validity bit gates initialization of the slot.
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

    /// Advances a cursor to the next live element, skipping holes and
    /// crossing chunk boundaries. The end sentinel stays put.
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
    pub fn iter(&self) -> Iter<'_, T, C, W, WORDS> {
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
        self.incomplete_head = NIL;
        self.incomplete_tail = NIL;
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
            while cursor.slot < C {
                if chunk.live.test(cursor.slot) {
                    return cursor;
                }
                cursor.slot += 1;
            }
            cursor = Cursor {
                chunk: chunk.next,
                slot: 0,
            };
        }
        Cursor::end()
    }

    // ========================================================================
    // Incomplete-chunk FIFO
    // ========================================================================

    /// Returns whether the chunk is threaded into the incomplete FIFO.
    fn in_incomplete(&self, id: usize) -> bool {
        let chunk = &self.chunks[id];
        chunk.inc_prev != NIL || chunk.inc_next != NIL || self.incomplete_head == id
    }

    /// Appends a chunk to the incomplete FIFO.
    fn incomplete_push(&mut self, id: usize) {
        {
            let chunk = &mut self.chunks[id];
            chunk.inc_prev = self.incomplete_tail;
            chunk.inc_next = NIL;
        }
        if self.incomplete_tail != NIL {
            self.chunks[self.incomplete_tail].inc_next = id;
        } else {
            self.incomplete_head = id;
        }
        self.incomplete_tail = id;
    }

    /// Unlinks a chunk from the incomplete FIFO if it is a member.
    fn incomplete_unlink(&mut self, id: usize) {
        if !self.in_incomplete(id) {
            return;
        }
        let (prev, next) = {
            let chunk = &self.chunks[id];
            (chunk.inc_prev, chunk.inc_next)
        };
        if prev != NIL {
            self.chunks[prev].inc_next = next;
        } else {
            self.incomplete_head = next;
        }
        if next != NIL {
            self.chunks[next].inc_prev = prev;
        } else {
            self.incomplete_tail = prev;
        }
        let chunk = &mut self.chunks[id];
        chunk.inc_prev = NIL;
        chunk.inc_next = NIL;
    }
}

impl<T, const C: usize, W: Word, const WORDS: usize> Default
    for StableSegmentedList<T, C, W, WORDS>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const C: usize, W: Word, const WORDS: usize> fmt::Debug
    for StableSegmentedList<T, C, W, WORDS>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Forward iterator over a [`StableSegmentedList`], skipping holes.
pub struct Iter<'a, T, const C: usize, W: Word, const WORDS: usize> {
    list: &'a StableSegmentedList<T, C, W, WORDS>,
    cursor: Cursor,
    remaining: usize,
}

impl<'a, T, const C: usize, W: Word, const WORDS: usize> Iterator for Iter<'a, T, C, W, WORDS> {
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

impl<T, const C: usize, W: Word, const WORDS: usize> ExactSizeIterator
    for Iter<'_, T, C, W, WORDS>
{
}

impl<'a, T, const C: usize, W: Word, const WORDS: usize> IntoIterator
    for &'a StableSegmentedList<T, C, W, WORDS>
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C, W, WORDS>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
