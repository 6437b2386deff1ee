//! Fixed-size packed bit vectors.
//!
//! `strata-bits` provides [`CompactBitset`], a value-type bit vector whose
//! size and backing word width are fixed at compile time. It exists to track
//! slot occupancy in block-based containers, where a handful of bits per
//! block must cost as little memory as possible and set/test must never
//! branch on the written value.
//!
//! # Example
//!
//! ```
//! use strata_bits::CompactBitset;
//!
//! // 12 bits packed into a single u16 word.
//! let mut bits: CompactBitset<12, u16> = CompactBitset::new();
//!
//! bits.set(3, true);
//! bits.set(7, true);
//!
//! assert!(bits.test(3));
//! assert!(!bits.test(4));
//! assert_eq!(bits.first_zero(), 0);
//! assert_eq!(bits.first_one(), 3);
//! assert_eq!(bits.count_ones(), 2);
//! ```
//!
//! # Choosing the word width
//!
//! The backing storage is `[W; WORDS]`. Pick the narrowest `W` whose width
//! covers the bit count, and `WORDS = N.div_ceil(W::BITS)`:
//!
//! | Bit count | Type | Storage |
//! |-----------|------|---------|
//! | `N <= 8` | `CompactBitset<N, u8>` | 1 byte |
//! | `N <= 16` | `CompactBitset<N, u16>` | 2 bytes |
//! | `N <= 32` | `CompactBitset<N, u32>` | 4 bytes |
//! | `N <= 64` | `CompactBitset<N>` | 8 bytes |
//! | `N > 64` | `CompactBitset<N, u64, WORDS>` | `WORDS * 8` bytes |
//!
//! A mismatched `WORDS` is rejected at compile time, so the parameters
//! cannot drift apart silently.

#![no_std]
#![warn(missing_docs)]

#[cfg(test)]
extern crate std;

mod bitset;
mod word;

pub use bitset::CompactBitset;
pub use word::Word;
