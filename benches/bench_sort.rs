use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use widesort::{sort_in_place, sort_index_u256, sort_index_u512, sort_u128, sort_words, Key};

const BATCH_SIZE: usize = 1_000_000;

fn random_keys<const W: usize>(rng: &mut StdRng, n: usize) -> Vec<Key<W>> {
    (0..n).map(|_| Key(std::array::from_fn(|_| rng.gen::<u64>()))).collect()
}

#[inline(never)]
fn standard_index_sort<const W: usize>(keys: &[Key<W>]) -> Vec<u32> {
    let mut idx = (0..keys.len() as u32).collect::<Vec<_>>();
    idx.sort_by_key(|&i| keys[i as usize]);
    idx
}

pub fn bench_sort(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);

    let keys128 = random_keys::<2>(&mut rng, BATCH_SIZE);
    let pool = random_keys::<2>(&mut rng, 256);
    let dup128 = (0..BATCH_SIZE)
        .map(|_| pool[rng.gen_range(0..pool.len())])
        .collect::<Vec<_>>();
    let keys256 = random_keys::<4>(&mut rng, BATCH_SIZE);
    let keys512 = random_keys::<8>(&mut rng, BATCH_SIZE);

    {
        let mut group = c.benchmark_group("u128");
        group.throughput(Throughput::Bytes((BATCH_SIZE * size_of::<Key<2>>()) as u64));

        group
            .bench_function("standard", |b| {
                b.iter_batched_ref(|| keys128.clone(), |k| k.sort_unstable(), BatchSize::LargeInput)
            })
            .bench_function("bit_partition", |b| {
                b.iter_batched_ref(|| keys128.clone(), |k| sort_u128(k), BatchSize::LargeInput)
            })
            .bench_function("words_generic", |b| {
                b.iter_batched_ref(
                    || keys128.iter().flat_map(|k| k.0).collect::<Vec<u64>>(),
                    |w| sort_words(w, 2),
                    BatchSize::LargeInput,
                )
            });
    }

    {
        let mut group = c.benchmark_group("u128_duplicates");
        group.throughput(Throughput::Bytes((BATCH_SIZE * size_of::<Key<2>>()) as u64));

        group
            .bench_function("standard", |b| {
                b.iter_batched_ref(|| dup128.clone(), |k| k.sort_unstable(), BatchSize::LargeInput)
            })
            .bench_function("bit_partition", |b| {
                b.iter_batched_ref(|| dup128.clone(), |k| sort_u128(k), BatchSize::LargeInput)
            });
    }

    {
        let mut group = c.benchmark_group("u256");
        group.throughput(Throughput::Bytes((BATCH_SIZE * size_of::<Key<4>>()) as u64));

        group
            .bench_function("standard_index", |b| b.iter(|| standard_index_sort(&keys256)))
            .bench_function("radix8_index", |b| {
                b.iter_batched_ref(
                    || ((0..BATCH_SIZE as u32).collect::<Vec<_>>(), vec![0_u32; BATCH_SIZE]),
                    |(idx, scratch)| sort_index_u256(idx, scratch, &keys256),
                    BatchSize::LargeInput,
                )
            })
            .bench_function("bit_partition", |b| {
                b.iter_batched_ref(|| keys256.clone(), |k| sort_in_place(k), BatchSize::LargeInput)
            });
    }

    {
        let mut group = c.benchmark_group("u512");
        group.throughput(Throughput::Bytes((BATCH_SIZE * size_of::<Key<8>>()) as u64));

        group
            .bench_function("standard_index", |b| b.iter(|| standard_index_sort(&keys512)))
            .bench_function("radix8_index", |b| {
                b.iter_batched_ref(
                    || ((0..BATCH_SIZE as u32).collect::<Vec<_>>(), vec![0_u32; BATCH_SIZE]),
                    |(idx, scratch)| sort_index_u512(idx, scratch, &keys512),
                    BatchSize::LargeInput,
                )
            });
    }
}

criterion_group!(benches, bench_sort);
criterion_main!(benches);
