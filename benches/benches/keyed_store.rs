// Copyright 2025 the Vantage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use vantage_store::{CacheKey, KeyGenerator, KeyedStore};

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyed_store");
    group.bench_function("set_get_tuple_keys_1000", |b| {
        b.iter_batched(
            KeyedStore::<u32>::new,
            |mut store| {
                for i in 0..1_000_u32 {
                    let _ = store.set(&("clip", i), i);
                }
                for i in 0..1_000_u32 {
                    black_box(store.get(&("clip", i)));
                }
                store
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("precomputed_keys_1000", |b| {
        let keys: Vec<CacheKey> = (0..1_000)
            .map(|i| CacheKey::from_name(&format!("clip{i}")))
            .collect();
        b.iter_batched(
            KeyedStore::<usize>::new,
            |mut store| {
                for (i, key) in keys.iter().enumerate() {
                    store.set_key(key.clone(), i);
                }
                for key in &keys {
                    black_box(store.get_key(key));
                }
                store
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_keygen(c: &mut Criterion) {
    c.bench_function("generate_10000", |b| {
        b.iter_batched(
            || KeyGenerator::with_rng(StdRng::seed_from_u64(7)),
            |mut keys| {
                for _ in 0..10_000 {
                    black_box(keys.generate());
                }
                keys.issued_count()
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_store, bench_keygen);
criterion_main!(benches);
