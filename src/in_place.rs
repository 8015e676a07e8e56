// In-place bit-partition sort.
//
// Each round scans the range once, ORing every key XORed with the first key. The top bit of that
// difference is the most significant bit on which the range disagrees, so the range is split on
// exactly that bit and any shared prefix is skipped in one step. Only the smaller half is
// sorted recursively, the larger one by the next loop iteration, which keeps the call depth
// logarithmic in the range length.

use std::mem;

use log::debug;

use crate::insertion::insertion_sort;
use crate::key::{bit_mask, highest_differing_bit, is_sorted, Limbs, U128};
use crate::SortConfig;

/// Sort two-word keys in place.
pub fn sort_u128(keys: &mut [U128]) {
    sort_in_place(keys)
}

/// Whether two-word keys are in non-decreasing order.
pub fn is_sorted_u128(keys: &[U128]) -> bool {
    is_sorted(keys)
}

/// Sort keys of any [`Limbs`] type in place, for example `u128` or [`crate::U256`].
pub fn sort_in_place<T: Limbs>(keys: &mut [T]) {
    sort_in_place_with_config(keys, &SortConfig::default())
}

pub fn sort_in_place_with_config<T: Limbs>(keys: &mut [T], config: &SortConfig) {
    if keys.len() <= 1 {
        return;
    }
    debug!("in-place bit-partition sort of {} keys of {} bits", keys.len(), T::BITS);
    sort_range(keys, config.in_place_cutoff());
}

fn sort_range<T: Limbs>(mut keys: &mut [T], cutoff: usize) {
    while keys.len() > cutoff {
        let Some(bit) = highest_differing_bit(keys) else {
            // all keys of the range are equal
            return;
        };

        let split = partition_by_bit(keys, bit);
        assert!(
            split > 0 && split < keys.len(),
            "partition on differing bit {bit} left an empty side (split {split} of {})",
            keys.len()
        );

        let (left, right) = mem::take(&mut keys).split_at_mut(split);
        if left.len() < right.len() {
            sort_range(left, cutoff);
            keys = right;
        } else {
            sort_range(right, cutoff);
            keys = left;
        }
    }

    insertion_sort(keys);
}

/// Move keys with `bit` clear in front of keys with `bit` set. Returns the number of keys with
/// the bit clear.
#[inline(never)]
pub(crate) fn partition_by_bit<T: Limbs>(keys: &mut [T], bit: u32) -> usize {
    let (word, mask) = bit_mask::<T>(bit);
    let is_set = |key: &T| key.limb(word) & mask != 0;

    let mut i = 0;
    let mut j = keys.len();
    loop {
        while i < j && !is_set(&keys[i]) {
            i += 1;
        }
        while i < j && is_set(&keys[j - 1]) {
            j -= 1;
        }
        if i >= j {
            return i;
        }
        keys.swap(i, j - 1);
        i += 1;
        j -= 1;
    }
}
