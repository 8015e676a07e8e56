// MSD radix sort over 3-bit digits that permutes an index array and never moves the keys.
//
// Digit groups are aligned to bit 0, so all groups are 3 bits wide except possibly the topmost
// one. Each range is counted into an 8 bucket histogram, scattered into the scratch buffer in
// input order (which keeps the sort stable) and copied back. Ranges still waiting for their next
// digit live on an explicit work-list: at most 7 pending siblings per digit level.

use log::{debug, trace};

use crate::insertion::insertion_sort_index;
use crate::key::{digit3_at, Limbs, U256, U512};
use crate::{Result, SortConfig, SortError, RADIX_BITS, RADIX_HIST_LEN};

struct Task {
    start: usize,
    len: usize,
    /// Lowest bit of the next digit group, `None` once every bit has been bucketed.
    position: Option<u32>,
}

/// Permute `idx` so that `keys[idx[i]]` is non-decreasing. Stable: indices of equal keys keep the
/// order they had in `idx`.
///
/// `idx` must hold a permutation of `0..keys.len()`; use [`identity_index`] or [`sorted_index`]
/// when starting from scratch. `scratch` must be as long as `idx`, its contents are overwritten.
pub fn sort_index_u256(idx: &mut [u32], scratch: &mut [u32], keys: &[U256]) -> Result<()> {
    sort_index(idx, scratch, keys)
}

/// Like [`sort_index_u256`] for eight-word keys.
pub fn sort_index_u512(idx: &mut [u32], scratch: &mut [u32], keys: &[U512]) -> Result<()> {
    sort_index(idx, scratch, keys)
}

pub fn sort_index<T: Limbs>(idx: &mut [u32], scratch: &mut [u32], keys: &[T]) -> Result<()> {
    sort_index_with_config(idx, scratch, keys, &SortConfig::default())
}

pub fn sort_index_with_config<T: Limbs>(
    idx: &mut [u32],
    scratch: &mut [u32],
    keys: &[T],
    config: &SortConfig,
) -> Result<()> {
    check_lengths(idx.len(), scratch.len(), keys.len())?;
    let n = idx.len();
    if n <= 1 || T::BITS == 0 {
        return Ok(());
    }
    debug!("radix-8 index sort of {n} keys of {} bits", T::BITS);

    let mut stack: Vec<Task> = Vec::new();
    stack.try_reserve_exact((RADIX_HIST_LEN - 1) * digit_levels::<T>() + 1)?;
    stack.push(Task { start: 0, len: n, position: Some(top_digit_position::<T>()) });

    let mut histogram = [0_u32; RADIX_HIST_LEN];
    while let Some(Task { start, len, mut position }) = stack.pop() {
        let range = &mut idx[start..start + len];
        let output = &mut scratch[start..start + len];

        // skip digits on which the whole range agrees
        let pos = loop {
            match position {
                Some(pos) if len > config.radix_cutoff() => {
                    if fill_histogram(range, keys, pos, &mut histogram) {
                        position = pos.checked_sub(RADIX_BITS as u32);
                    } else {
                        break Some(pos);
                    }
                }
                _ => break None,
            }
        };
        let Some(pos) = pos else {
            insertion_sort_index(range, keys);
            continue;
        };

        let counts = histogram;
        cumulative_histogram(&mut histogram);
        let offsets = histogram;
        reorder_indices(range, keys, output, &mut histogram, pos);
        range.copy_from_slice(output);

        let Some(next) = pos.checked_sub(RADIX_BITS as u32) else {
            // every bit has been bucketed, each bucket holds equal keys in input order
            continue;
        };
        for (count, offset) in counts.iter().zip(offsets) {
            if *count > 1 {
                stack.push(Task { start: start + offset as usize, len: *count as usize, position: Some(next) });
            }
        }
    }

    Ok(())
}

/// The identity permutation `0..n`.
pub fn identity_index(n: usize) -> Result<Vec<u32>> {
    if n > u32::MAX as usize {
        return Err(SortError::TooManyKeys { count: n });
    }
    let mut idx = Vec::new();
    idx.try_reserve_exact(n)?;
    idx.extend(0..n as u32);
    Ok(idx)
}

/// Allocate the index and scratch buffers and return the stable sorting permutation of `keys`.
pub fn sorted_index<T: Limbs>(keys: &[T]) -> Result<Vec<u32>> {
    let mut idx = identity_index(keys.len())?;
    let mut scratch = Vec::new();
    scratch.try_reserve_exact(keys.len())?;
    scratch.resize(keys.len(), 0);
    sort_index(&mut idx, &mut scratch, keys)?;
    Ok(idx)
}

fn check_lengths(idx: usize, scratch: usize, keys: usize) -> Result<()> {
    if idx > u32::MAX as usize {
        return Err(SortError::TooManyKeys { count: idx });
    }
    if scratch != idx {
        return Err(SortError::LengthMismatch { what: "scratch", expected: idx, actual: scratch });
    }
    if keys != idx {
        return Err(SortError::LengthMismatch { what: "keys", expected: idx, actual: keys });
    }
    Ok(())
}

/// Number of digit groups that cover a key.
fn digit_levels<T: Limbs>() -> usize {
    (T::BITS as usize).div_ceil(RADIX_BITS)
}

/// Lowest bit of the topmost digit group. That group holds `BITS % 3` bits, or 3 when the width
/// is a multiple of 3.
fn top_digit_position<T: Limbs>() -> u32 {
    (T::BITS - 1) / RADIX_BITS as u32 * RADIX_BITS as u32
}

/// Fill the histogram for the digit at `position`.
///
/// Returns true when all indices belong to the same bucket.
#[inline(never)]
fn fill_histogram<T: Limbs>(idx: &[u32], keys: &[T], position: u32, histogram: &mut [u32; RADIX_HIST_LEN]) -> bool {
    histogram.fill(0);

    let mut last_bucket = 0;
    idx.iter().for_each(|&i| {
        let bucket = digit3_at(&keys[i as usize], position);
        histogram[bucket] += 1;
        last_bucket = bucket;
    });

    // if every index is in the same bucket then this digit does not order the range
    let same = histogram[last_bucket] as usize == idx.len();
    if same {
        trace!("all {} keys share digit {last_bucket} at bit {position}", idx.len());
    }
    same
}

/// Calculate the prefix sum of the histogram, resulting in the starting offset of each bucket.
#[inline(never)]
fn cumulative_histogram<const N: usize>(histogram: &mut [u32; N]) {
    let mut sum = 0_u32;
    histogram.iter_mut().for_each(|count| {
        let tmp = *count;
        *count = sum;
        sum += tmp;
    });
}

/// Scatter `idx` into `output` by digit. `offsets` holds each bucket's next free slot.
#[inline(never)]
fn reorder_indices<T: Limbs>(
    idx: &[u32],
    keys: &[T],
    output: &mut [u32],
    offsets: &mut [u32; RADIX_HIST_LEN],
    position: u32,
) {
    idx.iter().for_each(|&i| {
        let bucket = digit3_at(&keys[i as usize], position);
        output[offsets[bucket] as usize] = i;
        offsets[bucket] += 1;
    });
}
