/// Tuning knobs of the sorts. None of them changes the result, only how fast it is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortConfig {
    generic_cutoff: usize,
    in_place_cutoff: usize,
    radix_cutoff: usize,
    width_dispatch: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            generic_cutoff: 16,
            in_place_cutoff: 48,
            radix_cutoff: 96,
            width_dispatch: true,
        }
    }
}

impl SortConfig {
    /// Ranges of at most this many keys are insertion sorted by the runtime-width sort.
    pub fn with_generic_cutoff(mut self, n: usize) -> Self {
        self.generic_cutoff = n.max(1);
        self
    }

    /// Ranges of at most this many keys are insertion sorted by the in-place value sort.
    pub fn with_in_place_cutoff(mut self, n: usize) -> Self {
        self.in_place_cutoff = n.max(1);
        self
    }

    /// Ranges of at most this many indices are insertion sorted by the radix index sort.
    pub fn with_radix_cutoff(mut self, n: usize) -> Self {
        self.radix_cutoff = n.max(1);
        self
    }

    /// Let the runtime-width sort hand 2, 4 and 8 word keys to the monomorphized
    /// in-place sort (default: true).
    pub fn with_width_dispatch(mut self, yes: bool) -> Self {
        self.width_dispatch = yes;
        self
    }

    pub fn generic_cutoff(&self) -> usize {
        self.generic_cutoff
    }

    pub fn in_place_cutoff(&self) -> usize {
        self.in_place_cutoff
    }

    pub fn radix_cutoff(&self) -> usize {
        self.radix_cutoff
    }

    pub fn width_dispatch(&self) -> bool {
        self.width_dispatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SortConfig::default();
        assert_eq!(config.generic_cutoff(), 16);
        assert_eq!(config.in_place_cutoff(), 48);
        assert_eq!(config.radix_cutoff(), 96);
        assert!(config.width_dispatch());
    }

    #[test]
    fn test_cutoffs_clamped() {
        let config = SortConfig::default()
            .with_generic_cutoff(0)
            .with_in_place_cutoff(0)
            .with_radix_cutoff(0)
            .with_width_dispatch(false);
        assert_eq!(config.generic_cutoff(), 1);
        assert_eq!(config.in_place_cutoff(), 1);
        assert_eq!(config.radix_cutoff(), 1);
        assert!(!config.width_dispatch());
    }
}
