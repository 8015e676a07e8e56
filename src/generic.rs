// Bit-partition sort for keys whose width is only known at runtime, stored back to back in one
// word slice.
//
// Pending ranges live on an explicit work-list instead of the call stack. Every range is split on
// its own highest differing bit, which is strictly below the bit its parent was split on, so a
// depth-first walk never holds more than `max_bit + 2` ranges.

use log::{debug, trace};

use crate::in_place::sort_in_place_with_config;
use crate::insertion::insertion_sort_words;
use crate::key::Key;
use crate::{Result, SortConfig, SortError};

struct Task {
    start: usize,
    len: usize,
}

/// Sort keys of `words_per_key` words, stored back to back in `words`, in place.
///
/// Zero-width keys and fewer than two keys are a no-op. A buffer that does not split into whole
/// keys is rejected before anything is moved.
pub fn sort_words(words: &mut [u64], words_per_key: usize) -> Result<()> {
    sort_words_with_config(words, words_per_key, &SortConfig::default())
}

pub fn sort_words_with_config(words: &mut [u64], words_per_key: usize, config: &SortConfig) -> Result<()> {
    if words_per_key == 0 {
        return Ok(());
    }
    if words.len() % words_per_key != 0 {
        return Err(SortError::RaggedKeys { words: words.len(), words_per_key });
    }
    let count = words.len() / words_per_key;
    if count <= 1 {
        return Ok(());
    }

    if config.width_dispatch() {
        match words_per_key {
            2 => return dispatch::<2>(words, config),
            4 => return dispatch::<4>(words, config),
            8 => return dispatch::<8>(words, config),
            _ => {}
        }
    }

    debug!("bit-partition sort of {count} keys of {words_per_key} words");

    let Some(max_bit) = max_bit(words, words_per_key) else {
        trace!("all {count} keys are zero");
        return Ok(());
    };

    let mut tmp = reserve_words(words_per_key)?;
    let mut diff = reserve_words(words_per_key)?;

    let mut stack: Vec<Task> = Vec::new();
    stack.try_reserve_exact(max_bit + 2)?;
    stack.push(Task { start: 0, len: count });

    while let Some(Task { start, len }) = stack.pop() {
        let range = &mut words[start * words_per_key..(start + len) * words_per_key];
        if len <= config.generic_cutoff() {
            insertion_sort_words(range, &mut tmp);
            continue;
        }

        let Some(bit) = highest_differing_bit_words(range, &mut diff) else {
            continue;
        };
        debug_assert!(bit <= max_bit);

        let split = partition_words(range, words_per_key, bit);
        assert!(
            split > 0 && split < len,
            "partition on differing bit {bit} left an empty side (split {split} of {len})"
        );

        // after a split on bit 0 both sides hold equal keys
        if bit == 0 {
            continue;
        }
        for (start, len) in [(start, split), (start + split, len - split)] {
            if len > 1 {
                stack.push(Task { start, len });
            }
        }
    }

    Ok(())
}

fn dispatch<const W: usize>(words: &mut [u64], config: &SortConfig) -> Result<()> {
    let keys = Key::<W>::as_keys_mut(words)?;
    sort_in_place_with_config(keys, config);
    Ok(())
}

fn reserve_words(len: usize) -> Result<Vec<u64>> {
    let mut words = Vec::new();
    words.try_reserve_exact(len)?;
    words.resize(len, 0);
    Ok(words)
}

/// Highest set bit over all keys, `None` when every key is zero.
pub fn max_bit(words: &[u64], words_per_key: usize) -> Option<usize> {
    if words_per_key == 0 {
        return None;
    }
    words
        .chunks_exact(words_per_key)
        .filter_map(|key| {
            let (word, &value) = key.iter().enumerate().find(|(_, w)| **w != 0)?;
            Some((words_per_key - 1 - word) * 64 + 63 - value.leading_zeros() as usize)
        })
        .max()
}

/// Highest bit on which the keys of `range` disagree, in one pass. `diff` holds one key's worth
/// of accumulators.
fn highest_differing_bit_words(range: &[u64], diff: &mut [u64]) -> Option<usize> {
    let width = diff.len();
    let (first, rest) = range.split_at(width);

    diff.fill(0);
    rest.chunks_exact(width).for_each(|key| {
        diff.iter_mut().zip(key.iter().zip(first)).for_each(|(d, (k, f))| *d |= k ^ f);
    });

    let (word, &value) = diff.iter().enumerate().find(|(_, d)| **d != 0)?;
    Some((width - 1 - word) * 64 + 63 - value.leading_zeros() as usize)
}

/// Two-pointer partition of whole keys on a global bit. Returns the number of keys with the bit
/// clear, which now lead the range.
fn partition_words(range: &mut [u64], width: usize, bit: usize) -> usize {
    let word = width - 1 - bit / 64;
    let mask = 1_u64 << (bit % 64);

    let mut i = 0;
    let mut j = range.len() / width;
    loop {
        while i < j && range[i * width + word] & mask == 0 {
            i += 1;
        }
        while i < j && range[(j - 1) * width + word] & mask != 0 {
            j -= 1;
        }
        if i >= j {
            return i;
        }
        swap_keys(range, width, i, j - 1);
        i += 1;
        j -= 1;
    }
}

fn swap_keys(range: &mut [u64], width: usize, a: usize, b: usize) {
    debug_assert!(a < b);
    let (low, high) = range.split_at_mut(b * width);
    low[a * width..(a + 1) * width].swap_with_slice(&mut high[..width]);
}
