//! Benchmarks comparing the segmented lists against std containers.
//!
//! Run with: cargo bench
//!
//! Containers are pre-sized where the API allows, and each iteration
//! rebuilds the same workload so the variants see identical element counts.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::prelude::*;
use std::collections::VecDeque;

use strata_collections::{CompactSegmentedList, StableSegmentedList};

const ELEMENTS: usize = 100_000;
const CHUNK: usize = 64;

// ============================================================================
// Fill Benchmarks
// ============================================================================

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");
    group.throughput(Throughput::Elements(ELEMENTS as u64));

    group.bench_function("stable", |b| {
        b.iter(|| {
            let mut list: StableSegmentedList<u64, CHUNK> = StableSegmentedList::new();
            for i in 0..ELEMENTS as u64 {
                black_box(list.insert(i));
            }
            list
        });
    });

    group.bench_function("compact", |b| {
        b.iter(|| {
            let mut list: CompactSegmentedList<u64, CHUNK> = CompactSegmentedList::new();
            for i in 0..ELEMENTS as u64 {
                black_box(list.insert(i));
            }
            list
        });
    });

    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut vec: Vec<u64> = Vec::new();
            for i in 0..ELEMENTS as u64 {
                vec.push(black_box(i));
            }
            vec
        });
    });

    group.finish();
}

// ============================================================================
// Iterate Benchmarks
// ============================================================================

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    group.throughput(Throughput::Elements(ELEMENTS as u64));

    let mut stable: StableSegmentedList<u64, CHUNK> = StableSegmentedList::new();
    let mut compact: CompactSegmentedList<u64, CHUNK> = CompactSegmentedList::new();
    let mut deque: VecDeque<u64> = VecDeque::with_capacity(ELEMENTS);
    for i in 0..ELEMENTS as u64 {
        stable.insert(i);
        compact.insert(i);
        deque.push_back(i);
    }

    group.bench_function("stable", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for value in &stable {
                sum += black_box(*value);
            }
            sum
        });
    });

    group.bench_function("compact", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for value in &compact {
                sum += black_box(*value);
            }
            sum
        });
    });

    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for value in &deque {
                sum += black_box(*value);
            }
            sum
        });
    });

    group.finish();
}

// ============================================================================
// Iterate After Churn (holes punched through the structure)
// ============================================================================

fn bench_iterate_after_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate_after_churn");
    group.throughput(Throughput::Elements((ELEMENTS / 2) as u64));

    let mut rng = StdRng::seed_from_u64(0x5eed);

    // Remove every other element in random order, leaving both lists at
    // half occupancy with scattered holes.
    let mut stable: StableSegmentedList<u64, CHUNK> = StableSegmentedList::new();
    let mut stable_cursors = Vec::with_capacity(ELEMENTS);
    for i in 0..ELEMENTS as u64 {
        stable_cursors.push(stable.insert(i));
    }
    stable_cursors.shuffle(&mut rng);
    for cursor in stable_cursors.drain(..ELEMENTS / 2) {
        stable.remove(cursor);
    }

    let mut compact: CompactSegmentedList<u64, CHUNK> = CompactSegmentedList::new();
    for i in 0..ELEMENTS as u64 {
        compact.insert(i);
    }
    for _ in 0..ELEMENTS / 2 {
        let front = compact.cursor_front();
        compact.remove(front);
    }

    group.bench_function("stable", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for value in &stable {
                sum += black_box(*value);
            }
            sum
        });
    });

    group.bench_function("compact", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for value in &compact {
                sum += black_box(*value);
            }
            sum
        });
    });

    group.finish();
}

// ============================================================================
// Churn Benchmarks (steady-state insert/remove)
// ============================================================================

fn bench_churn(c: &mut Criterion) {
    const OPS: usize = 10_000;

    let mut group = c.benchmark_group("churn");
    group.throughput(Throughput::Elements(OPS as u64));

    group.bench_function("stable", |b| {
        let mut list: StableSegmentedList<u64, CHUNK> = StableSegmentedList::new();
        let mut cursors = Vec::with_capacity(ELEMENTS);
        for i in 0..ELEMENTS as u64 {
            cursors.push(list.insert(i));
        }
        let mut rng = StdRng::seed_from_u64(0x5eed);

        b.iter(|| {
            for _ in 0..OPS {
                let index = rng.gen_range(0..cursors.len());
                let cursor = cursors.swap_remove(index);
                let (value, _) = list.remove(cursor);
                cursors.push(list.insert(black_box(value)));
            }
        });
    });

    group.bench_function("compact", |b| {
        let mut list: CompactSegmentedList<u64, CHUNK> = CompactSegmentedList::new();
        for i in 0..ELEMENTS as u64 {
            list.insert(i);
        }

        // Cursors go stale under relocation, so churn the front instead.
        b.iter(|| {
            for _ in 0..OPS {
                let front = list.cursor_front();
                let (value, _) = list.remove(front);
                black_box(list.insert(black_box(value)));
            }
        });
    });

    group.bench_function("vec_swap_remove", |b| {
        let mut vec: Vec<u64> = (0..ELEMENTS as u64).collect();
        let mut rng = StdRng::seed_from_u64(0x5eed);

        b.iter(|| {
            for _ in 0..OPS {
                let index = rng.gen_range(0..vec.len());
                let value = vec.swap_remove(index);
                vec.push(black_box(value));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_fill,
    bench_iterate,
    bench_iterate_after_churn,
    bench_churn
);
criterion_main!(benches);
