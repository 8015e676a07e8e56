//! Bit-partition and radix sorts for wide unsigned keys made of 64-bit words.
//!
//! - [`sort_words`]: keys of a runtime width stored back to back in a word slice.
//! - [`sort_u128`] / [`sort_in_place`]: in-place sort for any [`Limbs`] key, monomorphized per
//!   width.
//! - [`sort_index_u256`] / [`sort_index_u512`] / [`sort_index`]: stable radix-8 index sort that
//!   permutes an index array and leaves the keys untouched.

mod config;
mod error;
mod generic;
mod in_place;
mod insertion;
mod key;
mod radix8;

pub use config::SortConfig;
pub use error::{Result, SortError};
pub use generic::{max_bit, sort_words, sort_words_with_config};
pub use in_place::{is_sorted_u128, sort_in_place, sort_in_place_with_config, sort_u128};
pub use key::*;
pub use radix8::{
    identity_index, sort_index, sort_index_u256, sort_index_u512, sort_index_with_config, sorted_index,
};

// 3 -> 8 buckets, the histogram fits in a single cache line
pub(crate) const RADIX_BITS: usize = 3;
pub(crate) const RADIX_HIST_LEN: usize = 1 << RADIX_BITS;
pub(crate) const RADIX_HIST_MASK: u64 = (RADIX_HIST_LEN - 1) as u64;
