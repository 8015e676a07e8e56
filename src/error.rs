use std::collections::TryReserveError;

use thiserror::Error;

/// Result type alias for sort operations.
pub type Result<T> = std::result::Result<T, SortError>;

/// Errors reported by the sort entry points.
///
/// Only caller mistakes and allocation failure are reported here. A broken internal invariant
/// panics instead.
#[derive(Debug, Error)]
pub enum SortError {
    /// The word buffer does not split into whole keys.
    #[error("{words} words do not divide into keys of {words_per_key} words")]
    RaggedKeys { words: usize, words_per_key: usize },

    /// Index, scratch and key buffers of an index sort disagree in length.
    #[error("{what} holds {actual} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// More keys than a 32-bit index can address.
    #[error("{count} keys cannot be addressed by a 32-bit index")]
    TooManyKeys { count: usize },

    /// A work-list or temporary key buffer could not be reserved.
    #[error("failed to reserve sort buffers: {0}")]
    Allocation(#[from] TryReserveError),
}
