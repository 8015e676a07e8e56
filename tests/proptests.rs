use proptest::prelude::*;
use widesort::{
    identity_index, is_sorted_by_index, is_sorted_u128, sort_in_place_with_config, sort_index_with_config, sort_u128,
    sort_words_with_config, Key, SortConfig,
};

/// Keys drawn from a handful of values sharing long prefixes, so ties and shared digits are common.
fn narrow_word() -> BoxedStrategy<u64> {
    prop_oneof![Just(0_u64), Just(u64::MAX), Just(1_u64 << 63), 0..8_u64, any::<u64>()].boxed()
}

fn keys<const W: usize>(max_len: usize) -> impl Strategy<Value = Vec<Key<W>>> {
    prop::collection::vec(prop::array::uniform::<_, W>(narrow_word()).prop_map(Key), 0..max_len)
}

fn sorted_copy<const W: usize>(keys: &[Key<W>]) -> Vec<Key<W>> {
    let mut expected = keys.to_vec();
    expected.sort_unstable();
    expected
}

proptest! {
    #[test]
    fn prop_u128_sorts_like_std(input in keys::<2>(400)) {
        let mut sorted = input.clone();
        sort_u128(&mut sorted);
        prop_assert!(is_sorted_u128(&sorted));
        prop_assert_eq!(&sorted, &sorted_copy(&input));

        // idempotent
        let mut again = sorted.clone();
        sort_u128(&mut again);
        prop_assert_eq!(again, sorted);
    }

    #[test]
    fn prop_words_sort_like_std(
        width in 1_usize..=6,
        words in prop::collection::vec(narrow_word(), 0..600),
        cutoff in 1_usize..24,
        dispatch in any::<bool>(),
    ) {
        let len = words.len() / width * width;
        let words = &words[..len];
        let config = SortConfig::default().with_generic_cutoff(cutoff).with_width_dispatch(dispatch);

        let mut sorted = words.to_vec();
        sort_words_with_config(&mut sorted, width, &config).unwrap();

        let mut expected = words.chunks_exact(width).map(<[u64]>::to_vec).collect::<Vec<_>>();
        expected.sort_unstable();
        prop_assert_eq!(sorted, expected.concat());
    }

    #[test]
    fn prop_index_u256_stable_permutation(input in keys::<4>(400), cutoff in 1_usize..100) {
        let config = SortConfig::default().with_radix_cutoff(cutoff);
        let mut idx = identity_index(input.len()).unwrap();
        let mut scratch = vec![0; input.len()];
        sort_index_with_config(&mut idx, &mut scratch, &input, &config).unwrap();

        let mut expected = (0..input.len() as u32).collect::<Vec<_>>();
        expected.sort_by_key(|&i| input[i as usize]);
        prop_assert_eq!(&idx, &expected);

        // idempotent once the index is sorted
        let mut again = idx.clone();
        sort_index_with_config(&mut again, &mut scratch, &input, &config).unwrap();
        prop_assert_eq!(again, idx);
    }

    #[test]
    fn prop_index_u512_multiset(input in keys::<8>(200), cutoff in 1_usize..100) {
        let config = SortConfig::default().with_radix_cutoff(cutoff);
        let mut idx = identity_index(input.len()).unwrap();
        let mut scratch = vec![0; input.len()];
        sort_index_with_config(&mut idx, &mut scratch, &input, &config).unwrap();

        prop_assert!(is_sorted_by_index(&idx, &input));
        let by_index = idx.iter().map(|&i| input[i as usize]).collect::<Vec<_>>();
        prop_assert_eq!(by_index, sorted_copy(&input));
    }

    #[test]
    fn prop_in_place_any_width(input in keys::<3>(300), cutoff in 1_usize..64) {
        let config = SortConfig::default().with_in_place_cutoff(cutoff);
        let mut sorted = input.clone();
        sort_in_place_with_config(&mut sorted, &config);
        prop_assert_eq!(sorted, sorted_copy(&input));
    }
}
