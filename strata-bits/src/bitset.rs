//! Fixed-size bit vector packed into an array of machine words.

use core::fmt::{self, Write as _};

use crate::Word;

/// A fixed-size bit vector over `N` bits, stored as `[W; WORDS]`.
///
/// `WORDS` must equal `N.div_ceil(W::BITS)`; any other shape fails to
/// compile when the bitset is constructed. The defaults (`u64`, one word)
/// cover bit counts up to 64, and narrower words pack small bit counts
/// tighter — see the crate docs for the selection table.
///
/// Bits at index `>= N` in the final word occupy physical storage but are
/// never set by this type and are never reported by the aggregate queries
/// or scans.
///
/// # Contract
///
/// `set`, `test`, `first_zero`, and `first_one` have caller-side
/// preconditions (in-range index, non-full / non-empty set). Violations
/// trap in debug builds via `debug_assert!`; release builds return an
/// unspecified but memory-safe result.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CompactBitset<const N: usize, W: Word = u64, const WORDS: usize = 1> {
    words: [W; WORDS],
}

impl<const N: usize, W: Word, const WORDS: usize> CompactBitset<N, W, WORDS> {
    /// Bits used in the final word, or 0 if the final word is fully used.
    const TAIL_BITS: usize = N % W::BITS;

    /// Creates a bitset with all bits clear.
    #[inline]
    pub fn new() -> Self {
        const {
            assert!(
                WORDS == N.div_ceil(W::BITS),
                "WORDS must equal N.div_ceil(W::BITS)"
            )
        }
        Self {
            words: [W::ZERO; WORDS],
        }
    }

    /// Writes bit `index` to `value`.
    ///
    /// The write is branchless on `value`: both `set(i, true)` and
    /// `set(i, false)` execute the same masked-xor sequence, keeping timing
    /// flat in hot loops.
    ///
    /// `index` must be `< N`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        debug_assert!(index < N, "bit index {index} out of range for {N} bits");
        let mask = W::bit(index % W::BITS);
        let word = &mut self.words[index / W::BITS];
        *word ^= (W::splat(value) ^ *word) & mask;
    }

    /// Returns whether bit `index` is set. `index` must be `< N`.
    #[inline]
    pub fn test(&self, index: usize) -> bool {
        debug_assert!(index < N, "bit index {index} out of range for {N} bits");
        (self.words[index / W::BITS] & W::bit(index % W::BITS)) != W::ZERO
    }

    /// Returns `true` if every bit in `[0, N)` is set. `N == 0` counts as
    /// all-set.
    pub fn all(&self) -> bool {
        if N == 0 {
            return true;
        }
        let full_words = if Self::TAIL_BITS == 0 { WORDS } else { WORDS - 1 };
        for &word in &self.words[..full_words] {
            if word != W::MAX {
                return false;
            }
        }
        if Self::TAIL_BITS != 0 {
            return self.words[WORDS - 1] == W::low_mask(Self::TAIL_BITS);
        }
        true
    }

    /// Returns `true` if any bit in `[0, N)` is set.
    ///
    /// Padding bits are never written, so a plain word scan is exact.
    #[inline]
    pub fn any(&self) -> bool {
        self.words.iter().any(|&word| word != W::ZERO)
    }

    /// Returns `true` if no bit in `[0, N)` is set.
    #[inline]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Returns the lowest clear bit index.
    ///
    /// Scans word by word, counting trailing ones; padding bits in the
    /// final word are treated as set so they are never reported as free.
    ///
    /// The caller must have established `!self.all()`; if every bit is set
    /// this returns `N` (out of range) in release builds and traps in debug
    /// builds.
    pub fn first_zero(&self) -> usize {
        debug_assert!(!self.all(), "first_zero on a full bitset");
        for (i, &word) in self.words.iter().enumerate() {
            let word = if i == WORDS - 1 && Self::TAIL_BITS != 0 {
                word | !W::low_mask(Self::TAIL_BITS)
            } else {
                word
            };
            if word != W::MAX {
                return i * W::BITS + word.trailing_ones();
            }
        }
        N
    }

    /// Returns the lowest set bit index.
    ///
    /// The caller must have established `!self.none()`; if no bit is set
    /// this returns `N` (out of range) in release builds and traps in debug
    /// builds.
    pub fn first_one(&self) -> usize {
        debug_assert!(!self.none(), "first_one on an empty bitset");
        for (i, &word) in self.words.iter().enumerate() {
            if word != W::ZERO {
                return i * W::BITS + word.trailing_zeros();
            }
        }
        N
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|word| word.count_ones()).sum()
    }

    /// Returns the bit count `N`.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns `true` if the bitset holds zero bits (`N == 0`).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Clears every bit.
    #[inline]
    pub fn clear(&mut self) {
        self.words = [W::ZERO; WORDS];
    }
}

impl<const N: usize, W: Word, const WORDS: usize> Default for CompactBitset<N, W, WORDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, W: Word, const WORDS: usize> fmt::Display for CompactBitset<N, W, WORDS> {
    /// Renders the bits as a string of `0`/`1`, lowest index first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..N {
            f.write_char(if self.test(i) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl<const N: usize, W: Word, const WORDS: usize> fmt::Debug for CompactBitset<N, W, WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactBitset<{N}>({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_all_clear() {
        let bits: CompactBitset<40> = CompactBitset::new();
        assert!(bits.none());
        assert!(!bits.any());
        assert!(!bits.all());
        assert_eq!(bits.count_ones(), 0);
        assert_eq!(bits.len(), 40);
    }

    #[test]
    fn set_test_roundtrip() {
        let mut bits: CompactBitset<40> = CompactBitset::new();
        for i in 0..40 {
            bits.set(i, true);
            assert!(bits.test(i));
            bits.set(i, false);
            assert!(!bits.test(i));
        }
    }

    #[test]
    fn set_is_idempotent() {
        let mut bits: CompactBitset<16, u16> = CompactBitset::new();
        bits.set(5, true);
        bits.set(5, true);
        assert!(bits.test(5));
        assert_eq!(bits.count_ones(), 1);

        bits.set(5, false);
        bits.set(5, false);
        assert!(!bits.test(5));
        assert_eq!(bits.count_ones(), 0);
    }

    #[test]
    fn all_respects_padding() {
        // 12 bits in a 16-bit word: the 4 padding bits must not be required.
        let mut bits: CompactBitset<12, u16> = CompactBitset::new();
        for i in 0..12 {
            assert!(!bits.all());
            bits.set(i, true);
        }
        assert!(bits.all());
        assert!(bits.any());
        assert!(!bits.none());
    }

    #[test]
    fn all_spans_multiple_words() {
        let mut bits: CompactBitset<100, u32, 4> = CompactBitset::new();
        for i in 0..100 {
            bits.set(i, true);
        }
        assert!(bits.all());
        bits.set(63, false);
        assert!(!bits.all());
        assert!(bits.any());
    }

    #[test]
    fn first_zero_is_lowest() {
        let mut bits: CompactBitset<8, u8> = CompactBitset::new();
        assert_eq!(bits.first_zero(), 0);
        bits.set(0, true);
        bits.set(1, true);
        bits.set(3, true);
        assert_eq!(bits.first_zero(), 2);
        bits.set(2, true);
        assert_eq!(bits.first_zero(), 4);
    }

    #[test]
    fn first_zero_skips_full_words() {
        let mut bits: CompactBitset<100, u32, 4> = CompactBitset::new();
        for i in 0..70 {
            bits.set(i, true);
        }
        assert_eq!(bits.first_zero(), 70);
    }

    #[test]
    fn first_zero_never_reports_padding() {
        // 65 bits over two u64 words: only bit 64 is real in the last word.
        let mut bits: CompactBitset<65, u64, 2> = CompactBitset::new();
        for i in 0..64 {
            bits.set(i, true);
        }
        assert_eq!(bits.first_zero(), 64);
    }

    #[test]
    fn first_one_is_lowest() {
        let mut bits: CompactBitset<40> = CompactBitset::new();
        bits.set(17, true);
        bits.set(33, true);
        assert_eq!(bits.first_one(), 17);
        bits.set(4, true);
        assert_eq!(bits.first_one(), 4);
    }

    #[test]
    fn any_none_are_negations() {
        let mut bits: CompactBitset<33, u64> = CompactBitset::new();
        assert!(bits.none());
        assert_eq!(bits.any(), !bits.none());
        bits.set(32, true);
        assert!(bits.any());
        assert_eq!(bits.any(), !bits.none());
    }

    #[test]
    fn zero_bits_degenerate() {
        let bits: CompactBitset<0, u8, 0> = CompactBitset::new();
        assert!(bits.all());
        assert!(bits.none());
        assert!(!bits.any());
        assert_eq!(bits.len(), 0);
        assert!(bits.is_empty());
    }

    #[test]
    fn clear_resets() {
        let mut bits: CompactBitset<24, u32> = CompactBitset::new();
        for i in (0..24).step_by(3) {
            bits.set(i, true);
        }
        bits.clear();
        assert!(bits.none());
    }

    #[test]
    fn display_renders_bit_string() {
        let mut bits: CompactBitset<6, u8> = CompactBitset::new();
        bits.set(1, true);
        bits.set(4, true);
        assert_eq!(std::format!("{bits}"), "010010");
        assert_eq!(std::format!("{bits:?}"), "CompactBitset<6>(010010)");
    }
}
