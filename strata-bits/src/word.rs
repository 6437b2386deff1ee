//! Word-level primitives backing [`CompactBitset`](crate::CompactBitset).

use core::fmt::Debug;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// An unsigned machine word usable as bitset storage.
///
/// Implemented for `u8`, `u16`, `u32`, and `u64`. The trait exposes exactly
/// the operations the bitset's hot paths need: single-bit masks, low-bit
/// masks for partial final words, a branch-free bool-to-mask splat, and
/// trailing-bit scans for the first-zero/first-one searches.
pub trait Word:
    Copy
    + Eq
    + Debug
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + BitAndAssign
    + BitOrAssign
    + BitXorAssign
{
    /// Width of the word in bits.
    const BITS: usize;

    /// The all-zeros word.
    const ZERO: Self;

    /// The all-ones word.
    const MAX: Self;

    /// Mask with only bit `index` set. `index` must be `< BITS`.
    fn bit(index: usize) -> Self;

    /// Mask with the low `count` bits set. `count` must be in `1..BITS`.
    fn low_mask(count: usize) -> Self;

    /// All-ones if `value`, all-zeros otherwise, without branching.
    fn splat(value: bool) -> Self;

    /// Number of trailing one bits.
    fn trailing_ones(self) -> usize;

    /// Number of trailing zero bits.
    fn trailing_zeros(self) -> usize;

    /// Number of set bits.
    fn count_ones(self) -> usize;
}

macro_rules! impl_word {
    ($($ty:ty),*) => {
        $(
            impl Word for $ty {
                const BITS: usize = <$ty>::BITS as usize;
                const ZERO: Self = 0;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn bit(index: usize) -> Self {
                    debug_assert!(index < <Self as Word>::BITS);
                    1 << index
                }

                #[inline]
                fn low_mask(count: usize) -> Self {
                    debug_assert!(count >= 1 && count < <Self as Word>::BITS);
                    (1 << count) - 1
                }

                #[inline]
                fn splat(value: bool) -> Self {
                    (value as $ty).wrapping_neg()
                }

                #[inline]
                fn trailing_ones(self) -> usize {
                    <$ty>::trailing_ones(self) as usize
                }

                #[inline]
                fn trailing_zeros(self) -> usize {
                    <$ty>::trailing_zeros(self) as usize
                }

                #[inline]
                fn count_ones(self) -> usize {
                    <$ty>::count_ones(self) as usize
                }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64);
