use chained_hashtable::{DefaultHash, HashTable, KeyHash, MixingHash};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

const N: usize = 100_000;
const CAPACITY: usize = 1 << 17;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled<H: KeyHash<u64>>(hasher: H, seed: u64) -> (HashTable<u64, u64, H>, Vec<u64>) {
    let mut t = HashTable::with_capacity_and_hasher(CAPACITY, hasher);
    let keys: Vec<u64> = lcg(seed).take(N).collect();
    for (i, k) in keys.iter().enumerate() {
        let _ = t.insert(*k, i as u64);
    }
    (t, keys)
}

// Precompute 10k random picks from `keys`.
fn queries(keys: &[u64]) -> Vec<u64> {
    let n = keys.len();
    let mut s = 0x9e3779b97f4a7c15u64;
    (0..10_000)
        .map(|_| {
            s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
            keys[(s as usize) % n]
        })
        .collect()
}

fn bench_insert_100k(c: &mut Criterion) {
    c.bench_function("table::insert_100k_default_hash", |b| {
        b.iter_batched(
            || HashTable::<u64, u64>::with_capacity(CAPACITY),
            |mut t| {
                for (i, x) in lcg(1).take(N).enumerate() {
                    let _ = t.insert(x, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("table::insert_100k_mixing_hash", |b| {
        b.iter_batched(
            || HashTable::<u64, u64, MixingHash>::with_capacity_and_hasher(CAPACITY, MixingHash::default()),
            |mut t| {
                for (i, x) in lcg(1).take(N).enumerate() {
                    let _ = t.insert(x, i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit_10k(c: &mut Criterion) {
    c.bench_function("table::find_hit_10k_on_100k_default_hash", |b| {
        let (t, keys) = filled(DefaultHash, 7);
        let qs = queries(&keys);
        b.iter(|| {
            for k in &qs {
                black_box(t.find(k));
            }
        })
    });

    c.bench_function("table::find_hit_10k_on_100k_mixing_hash", |b| {
        let (t, keys) = filled(MixingHash::default(), 7);
        let qs = queries(&keys);
        b.iter(|| {
            for k in &qs {
                black_box(t.find(k));
            }
        })
    });
}

fn bench_find_miss_10k(c: &mut Criterion) {
    c.bench_function("table::find_miss_10k_on_100k", |b| {
        let (t, _) = filled(DefaultHash, 11);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = miss.next().unwrap_or_default();
                black_box(t.find(&k));
            }
        })
    });
}

// Same-length strings all share one bucket under the length hash.
fn bench_string_keys(c: &mut Criterion) {
    let keys: Vec<String> = lcg(21).take(2_000).map(key).collect();

    c.bench_function("table::string_find_2k_default_hash", |b| {
        let mut t: HashTable<String, usize> = HashTable::with_capacity(4_096);
        for (i, k) in keys.iter().enumerate() {
            let _ = t.insert(k.clone(), i);
        }
        b.iter(|| {
            for k in &keys {
                black_box(t.get(k.as_str()));
            }
        })
    });

    c.bench_function("table::string_find_2k_mixing_hash", |b| {
        let mut t: HashTable<String, usize, MixingHash> =
            HashTable::with_capacity_and_hasher(4_096, MixingHash::default());
        for (i, k) in keys.iter().enumerate() {
            let _ = t.insert(k.clone(), i);
        }
        b.iter(|| {
            for k in &keys {
                black_box(t.get(k.as_str()));
            }
        })
    });
}

fn bench_remove_and_iter(c: &mut Criterion) {
    c.bench_function("table::remove_random_10k_of_100k", |b| {
        b.iter_batched(
            || {
                let (t, keys) = filled(DefaultHash, 5);
                let qs = queries(&keys);
                (t, qs)
            },
            |(mut t, qs)| {
                for k in &qs {
                    let _ = t.remove(k);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("table::iter_all_100k", |b| {
        let (t, _) = filled(DefaultHash, 999);
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in t.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });

    c.bench_function("table::values_mut_increment_all_100k", |b| {
        b.iter_batched(
            || filled(DefaultHash, 1001).0,
            |mut t| {
                for v in t.values_mut() {
                    *v = v.wrapping_add(1);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_100k, bench_find_hit_10k, bench_find_miss_10k, bench_string_keys, bench_remove_and_iter
}
criterion_main!(benches);
