// Fixed-width unsigned keys made of 64-bit words, most significant word first.
//
// Bit positions are global across the whole key: position `64 * WORDS - 1` is the top bit of
// word 0 and position 0 is the bottom bit of the last word.

use std::cmp::Ordering;
use std::ops::{BitOr, BitXor};

use bytemuck::{Pod, Zeroable};

use crate::{Result, SortError, RADIX_BITS, RADIX_HIST_MASK};

/// A key that can be viewed as `WORDS` big-endian 64-bit words.
///
/// Besides word access, implementors provide the bitwise operations the difference scan
/// runs on, so that native integers keep their single-instruction forms.
pub trait Limbs: Copy + 'static {
    const WORDS: usize;
    const BITS: u32 = 64 * Self::WORDS as u32;
    const ZERO: Self;

    /// Word `i` of the key, word 0 being the most significant.
    fn limb(&self, i: usize) -> u64;

    fn xor(&self, other: &Self) -> Self;

    fn or(&self, other: &Self) -> Self;

    /// Leading zero bits of the whole key, `BITS` when the key is zero.
    fn leading_zeros(&self) -> u32;

    #[inline(always)]
    fn cmp_limbs(&self, other: &Self) -> Ordering {
        for i in 0..Self::WORDS {
            match self.limb(i).cmp(&other.limb(i)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl Limbs for u64 {
    const WORDS: usize = 1;
    const ZERO: Self = 0;

    #[inline(always)]
    fn limb(&self, i: usize) -> u64 {
        debug_assert_eq!(i, 0);
        *self
    }

    #[inline(always)]
    fn xor(&self, other: &Self) -> Self {
        self ^ other
    }

    #[inline(always)]
    fn or(&self, other: &Self) -> Self {
        self | other
    }

    #[inline(always)]
    fn leading_zeros(&self) -> u32 {
        u64::leading_zeros(*self)
    }

    #[inline(always)]
    fn cmp_limbs(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Limbs for u128 {
    const WORDS: usize = 2;
    const ZERO: Self = 0;

    #[inline(always)]
    fn limb(&self, i: usize) -> u64 {
        debug_assert!(i < 2);
        (*self >> (64 * (1 - i))) as u64
    }

    #[inline(always)]
    fn xor(&self, other: &Self) -> Self {
        self ^ other
    }

    #[inline(always)]
    fn or(&self, other: &Self) -> Self {
        self | other
    }

    #[inline(always)]
    fn leading_zeros(&self) -> u32 {
        u128::leading_zeros(*self)
    }

    #[inline(always)]
    fn cmp_limbs(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// A key of `W` words. Word 0 is the most significant, so the derived ordering is the key
/// ordering.
///
/// The layout is exactly `[u64; W]`, which lets a flat word buffer be viewed as keys with
/// [`Key::as_keys`] and [`Key::as_keys_mut`].
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key<const W: usize>(pub [u64; W]);

pub type U128 = Key<2>;
pub type U256 = Key<4>;
pub type U512 = Key<8>;

// SAFETY: `Key<W>` is a transparent wrapper around `[u64; W]`, which is `Pod`.
unsafe impl<const W: usize> Zeroable for Key<W> {}
unsafe impl<const W: usize> Pod for Key<W> {}

impl<const W: usize> Default for Key<W> {
    fn default() -> Self {
        Self([0; W])
    }
}

impl<const W: usize> From<[u64; W]> for Key<W> {
    fn from(words: [u64; W]) -> Self {
        Self(words)
    }
}

impl From<u128> for U128 {
    fn from(value: u128) -> Self {
        Self([(value >> 64) as u64, value as u64])
    }
}

impl From<U128> for u128 {
    fn from(key: U128) -> Self {
        (u128::from(key.0[0]) << 64) | u128::from(key.0[1])
    }
}

impl<const W: usize> BitXor for Key<W> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(mut self, rhs: Self) -> Self {
        self.0.iter_mut().zip(rhs.0).for_each(|(a, b)| *a ^= b);
        self
    }
}

impl<const W: usize> BitOr for Key<W> {
    type Output = Self;

    #[inline(always)]
    fn bitor(mut self, rhs: Self) -> Self {
        self.0.iter_mut().zip(rhs.0).for_each(|(a, b)| *a |= b);
        self
    }
}

impl<const W: usize> Key<W> {
    /// View a flat word buffer as keys. Fails unless the length is a multiple of `W`.
    pub fn as_keys(words: &[u64]) -> Result<&[Self]> {
        if W == 0 {
            return Err(SortError::RaggedKeys { words: words.len(), words_per_key: W });
        }
        bytemuck::try_cast_slice(words).map_err(|_| SortError::RaggedKeys { words: words.len(), words_per_key: W })
    }

    /// Mutable view of a flat word buffer as keys. Fails unless the length is a multiple of `W`.
    pub fn as_keys_mut(words: &mut [u64]) -> Result<&mut [Self]> {
        let len = words.len();
        if W == 0 {
            return Err(SortError::RaggedKeys { words: len, words_per_key: W });
        }
        bytemuck::try_cast_slice_mut(words).map_err(|_| SortError::RaggedKeys { words: len, words_per_key: W })
    }

    pub fn words(&self) -> &[u64; W] {
        &self.0
    }
}

impl<const W: usize> Limbs for Key<W> {
    const WORDS: usize = W;
    const ZERO: Self = Self([0; W]);

    #[inline(always)]
    fn limb(&self, i: usize) -> u64 {
        self.0[i]
    }

    #[inline(always)]
    fn xor(&self, other: &Self) -> Self {
        *self ^ *other
    }

    #[inline(always)]
    fn or(&self, other: &Self) -> Self {
        *self | *other
    }

    #[inline(always)]
    fn leading_zeros(&self) -> u32 {
        let mut zeros = 0;
        for &word in &self.0 {
            if word != 0 {
                return zeros + word.leading_zeros();
            }
            zeros += 64;
        }
        zeros
    }

    #[inline(always)]
    fn cmp_limbs(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// Lexicographic comparison, most significant word first.
#[inline(always)]
pub fn compare<T: Limbs>(a: &T, b: &T) -> Ordering {
    a.cmp_limbs(b)
}

/// Lexicographic comparison of two keys stored as equally long word slices.
#[inline(always)]
pub fn compare_words(a: &[u64], b: &[u64]) -> Ordering {
    debug_assert_eq!(a.len(), b.len());
    a.cmp(b)
}

/// Word index and in-word mask of a global bit position.
#[inline(always)]
pub(crate) fn bit_mask<T: Limbs>(position: u32) -> (usize, u64) {
    debug_assert!(position < T::BITS);
    (T::WORDS - 1 - (position / 64) as usize, 1 << (position % 64))
}

/// The bit of `key` at a global bit position, as 0 or 1.
#[inline(always)]
pub fn bit_at<T: Limbs>(key: &T, position: u32) -> u64 {
    let (word, mask) = bit_mask::<T>(position);
    u64::from(key.limb(word) & mask != 0)
}

/// The 3-bit digit made of bits `position + 2 ..= position`.
///
/// Bits above the top of the key read as zero, which makes the topmost group narrower when the
/// key width is not a multiple of 3. A group that crosses into the next more significant word
/// takes its upper bits from that word.
#[inline(always)]
pub fn digit3_at<T: Limbs>(key: &T, position: u32) -> usize {
    let word = T::WORDS - 1 - (position / 64) as usize;
    let shift = position % 64;
    let mut bits = key.limb(word) >> shift;
    if shift > 64 - RADIX_BITS as u32 && word > 0 {
        bits |= key.limb(word - 1) << (64 - shift);
    }
    (bits & RADIX_HIST_MASK) as usize
}

/// Position of the highest set bit of `key`, `None` for the zero key.
#[inline(always)]
pub fn highest_set_bit<T: Limbs>(key: &T) -> Option<u32> {
    let zeros = key.leading_zeros();
    (zeros < T::BITS).then(|| T::BITS - 1 - zeros)
}

/// Highest bit position on which the keys of `keys` do not all agree, found in a single pass
/// that ORs together every key XORed with the first one. `None` when all keys are equal.
#[inline(never)]
pub fn highest_differing_bit<T: Limbs>(keys: &[T]) -> Option<u32> {
    let (first, rest) = keys.split_first()?;

    let chunks = rest.chunks_exact(4);
    let remainder = chunks.remainder();
    let mut diff = T::ZERO;
    chunks.into_iter().for_each(|chunk| {
        let a = chunk[0].xor(first).or(&chunk[1].xor(first));
        let b = chunk[2].xor(first).or(&chunk[3].xor(first));
        diff = diff.or(&a.or(&b));
    });
    remainder.iter().for_each(|key| diff = diff.or(&key.xor(first)));

    highest_set_bit(&diff)
}

/// Whether `keys` is in non-decreasing order.
pub fn is_sorted<T: Limbs>(keys: &[T]) -> bool {
    keys.windows(2).all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Whether `idx` lists `keys` in non-decreasing order.
pub fn is_sorted_by_index<T: Limbs>(idx: &[u32], keys: &[T]) -> bool {
    idx.windows(2)
        .all(|pair| compare(&keys[pair[0] as usize], &keys[pair[1] as usize]) != Ordering::Greater)
}

/// Whether the flat word buffer holds keys of `words_per_key` words in non-decreasing order.
/// A buffer that does not split into whole keys is not sorted.
pub fn is_sorted_words(words: &[u64], words_per_key: usize) -> bool {
    if words_per_key == 0 {
        return true;
    }
    if words.len() % words_per_key != 0 {
        return false;
    }
    words
        .chunks_exact(words_per_key)
        .zip(words.chunks_exact(words_per_key).skip(1))
        .all(|(a, b)| compare_words(a, b) != Ordering::Greater)
}
