use avl_multi::{AvlMultimap, AvlMultiset};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;

const N: usize = 10_000;

/// Distinct keys; every key is put `N / DISTINCT` times.
const DISTINCT: i64 = 1_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).map(|i| i % DISTINCT).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().map(|i| i % DISTINCT).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64 % DISTINCT);
    }
    keys
}

fn key_orders() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

/// The closest standard equivalent of a multiset: a map of occurrence counts.
fn btree_counts(keys: &[i64]) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for &key in keys {
        *counts.entry(key).or_default() += 1;
    }
    counts
}

// ─── Multiset Benchmarks ────────────────────────────────────────────────────

fn bench_multiset_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiset_insert");

    for (order, keys) in key_orders() {
        group.bench_function(BenchmarkId::new("AvlMultiset", order), |b| {
            b.iter(|| keys.iter().copied().collect::<AvlMultiset<i64>>());
        });
        group.bench_function(BenchmarkId::new("BTreeMap<_, usize>", order), |b| {
            b.iter(|| btree_counts(&keys));
        });
    }

    group.finish();
}

fn bench_multiset_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiset_count");

    for (order, keys) in key_orders() {
        let set: AvlMultiset<i64> = keys.iter().copied().collect();
        let counts = btree_counts(&keys);

        group.bench_function(BenchmarkId::new("AvlMultiset", order), |b| {
            b.iter(|| keys.iter().map(|key| set.count(key)).sum::<usize>());
        });
        group.bench_function(BenchmarkId::new("BTreeMap<_, usize>", order), |b| {
            b.iter(|| keys.iter().map(|key| counts.get(key).copied().unwrap_or(0)).sum::<usize>());
        });
    }

    group.finish();
}

fn bench_multiset_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiset_remove");

    for (order, keys) in key_orders() {
        let set: AvlMultiset<i64> = keys.iter().copied().collect();
        let counts = btree_counts(&keys);

        group.bench_function(BenchmarkId::new("AvlMultiset", order), |b| {
            b.iter_batched(
                || set.clone(),
                |mut set| {
                    for key in &keys {
                        set.remove(key);
                    }
                    set
                },
                criterion::BatchSize::SmallInput,
            );
        });
        group.bench_function(BenchmarkId::new("BTreeMap<_, usize>", order), |b| {
            b.iter_batched(
                || counts.clone(),
                |mut counts| {
                    for key in &keys {
                        if let Some(count) = counts.get_mut(key) {
                            *count -= 1;
                            if *count == 0 {
                                counts.remove(key);
                            }
                        }
                    }
                    counts
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ─── Multimap Benchmarks ────────────────────────────────────────────────────

fn bench_multimap_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("multimap_insert");

    for (order, keys) in key_orders() {
        group.bench_function(BenchmarkId::new("AvlMultimap", order), |b| {
            b.iter(|| {
                let mut map = AvlMultimap::new();
                for (i, &key) in keys.iter().enumerate() {
                    map.insert(key, i);
                }
                map
            });
        });
        group.bench_function(BenchmarkId::new("BTreeMap<_, Vec<_>>", order), |b| {
            b.iter(|| {
                let mut map: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
                for (i, &key) in keys.iter().enumerate() {
                    map.entry(key).or_default().push(i);
                }
                map
            });
        });
    }

    group.finish();
}

fn bench_multimap_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("multimap_get");

    for (order, keys) in key_orders() {
        let map: AvlMultimap<i64, usize> = keys.iter().copied().zip(0..).collect();

        group.bench_function(BenchmarkId::new("AvlMultimap", order), |b| {
            b.iter(|| keys.iter().map(|key| map.get(key).sum::<usize>()).sum::<usize>());
        });
    }

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(multiset_benches, bench_multiset_insert, bench_multiset_count, bench_multiset_remove,);

criterion_group!(multimap_benches, bench_multimap_insert, bench_multimap_get,);

criterion_main!(multiset_benches, multimap_benches,);
