// Insertion sorts used as the base case of every sort in this crate.
//
// All of them move an element only past strictly greater predecessors, so equal keys keep their
// relative order.

use std::cmp::Ordering;

use crate::key::{compare, compare_words, Limbs};

#[inline(never)]
pub(crate) fn insertion_sort<T: Limbs>(keys: &mut [T]) {
    for i in 1..keys.len() {
        let key = keys[i];
        let mut j = i;
        while j > 0 && compare(&keys[j - 1], &key) == Ordering::Greater {
            keys[j] = keys[j - 1];
            j -= 1;
        }
        keys[j] = key;
    }
}

/// Sort `idx` by the keys it points at.
#[inline(never)]
pub(crate) fn insertion_sort_index<T: Limbs>(idx: &mut [u32], keys: &[T]) {
    for i in 1..idx.len() {
        let id = idx[i];
        let key = &keys[id as usize];
        let mut j = i;
        while j > 0 && compare(&keys[idx[j - 1] as usize], key) == Ordering::Greater {
            idx[j] = idx[j - 1];
            j -= 1;
        }
        idx[j] = id;
    }
}

/// Sort keys of `tmp.len()` words stored back to back in `words`. `tmp` holds the key being
/// inserted.
#[inline(never)]
pub(crate) fn insertion_sort_words(words: &mut [u64], tmp: &mut [u64]) {
    let width = tmp.len();
    debug_assert!(width > 0 && words.len() % width == 0);

    for i in 1..words.len() / width {
        tmp.copy_from_slice(&words[i * width..(i + 1) * width]);
        let mut j = i;
        while j > 0 && compare_words(&words[(j - 1) * width..j * width], tmp) == Ordering::Greater {
            words.copy_within((j - 1) * width..j * width, j * width);
            j -= 1;
        }
        words[j * width..(j + 1) * width].copy_from_slice(tmp);
    }
}
