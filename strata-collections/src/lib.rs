//! Segmented-list containers.
//!
//! Elements live in fixed-capacity chunks chained together, trading between
//! the contiguous-array model (great locality, O(n) splice) and the classic
//! linked list (O(1) splice, poor locality): a single insert or remove
//! touches one chunk, while iteration scans mostly-contiguous memory.
//!
//! Two variants cover the two ways to track which slots in a chunk are
//! occupied:
//!
//! | Container | Bookkeeping | Remove | Slot identity |
//! |-----------|-------------|--------|---------------|
//! | [`StableSegmentedList`] | validity bitset | clears the slot's bit | preserved — live elements never move |
//! | [`CompactSegmentedList`] | live count | swap-remove with the chunk's last element | **not** preserved |
//!
//! The stable variant reuses holes left by removals before growing the
//! chain, at the price of a per-chunk bitset and an index of partially
//! filled chunks. The compact variant is leaner and faster but relocates an
//! element on every mid-chunk removal.
//!
//! # Quick start
//!
//! ```
//! use strata_collections::StableSegmentedList;
//!
//! // Chunks of four elements each.
//! let mut list: StableSegmentedList<&str, 4> = StableSegmentedList::new();
//!
//! list.insert("a");
//! let b = list.insert("b");
//! list.insert("c");
//!
//! // Remove through a cursor; get back the element and a cursor to the
//! // logical successor, so removal scans need no restart.
//! let (removed, next) = list.remove(b);
//! assert_eq!(removed, "b");
//! assert_eq!(list.get(next), Some(&"c"));
//!
//! // The hole is reused before the chain grows.
//! let d = list.insert("d");
//! assert_eq!(d, b);
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "d", "c"]);
//! ```
//!
//! # Cursors
//!
//! Positions are named by a copyable [`Cursor`] rather than a borrowing
//! iterator, so a scan can interleave reads, writes, and removals:
//! [`iter`](StableSegmentedList::iter) for plain forward reads,
//! [`cursor_front`](StableSegmentedList::cursor_front) /
//! [`next_cursor`](StableSegmentedList::next_cursor) /
//! [`get_mut`](StableSegmentedList::get_mut) when the scan mutates.
//!
//! # Configuration
//!
//! Everything is fixed at compile time: the element type, the chunk
//! capacity `C`, and (stable variant) the occupancy bitset's word shape.
//! There are no runtime knobs, no threads, and no ordering guarantee among
//! elements.

#![warn(missing_docs)]

pub mod compact;
mod cursor;
pub mod stable;

pub use compact::CompactSegmentedList;
pub use cursor::Cursor;
pub use stable::StableSegmentedList;
