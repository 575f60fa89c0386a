//! Benchmarks for the dispatch ledger and its AVL index.
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- create_order
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use glide_dispatch::{BalancedOrderIndex, DispatchLedger};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Deterministic (placed_at, value, travel_time) inputs
fn generate_orders(count: usize, seed: u64) -> Vec<(u64, u64, u64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count as u64)
        .map(|clock| (clock, rng.gen_range(0..500), rng.gen_range(1..60)))
        .collect()
}

fn populated_ledger(count: usize) -> DispatchLedger {
    let mut ledger = DispatchLedger::with_capacity(count);
    for (i, (placed_at, value, travel_time)) in generate_orders(count, 42).into_iter().enumerate() {
        ledger
            .create_order(i as u64, placed_at, value, travel_time)
            .expect("unique ids");
    }
    ledger
}

// ============================================================================
// BENCHMARKS
// ============================================================================

fn bench_index_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_insert");
    for size in [1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("ascending", size), &size, |b, &size| {
            b.iter(|| {
                let mut index = BalancedOrderIndex::new();
                for key in 0..size as u64 {
                    index.insert(key);
                }
                black_box(index.height())
            })
        });
    }
    group.finish();
}

fn bench_create_order(c: &mut Criterion) {
    let orders = generate_orders(10_000, 7);
    let mut group = c.benchmark_group("create_order");
    group.throughput(Throughput::Elements(orders.len() as u64));
    group.bench_function("10k", |b| {
        b.iter_batched(
            || DispatchLedger::with_capacity(orders.len()),
            |mut ledger| {
                for (i, &(placed_at, value, travel_time)) in orders.iter().enumerate() {
                    let _ = ledger.create_order(i as u64, placed_at, value, travel_time);
                }
                ledger
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let ledger = populated_ledger(10_000);
    let mut group = c.benchmark_group("queries");

    group.bench_function("lookup_by_id", |b| {
        b.iter(|| black_box(ledger.lookup_by_id(black_box(5_000))))
    });
    group.bench_function("orders_due_between", |b| {
        b.iter(|| black_box(ledger.orders_due_between(black_box(1_000), black_box(1_200))))
    });
    group.bench_function("rank_by_id", |b| {
        b.iter(|| black_box(ledger.rank_by_id(black_box(5_000))))
    });
    group.finish();
}

fn bench_cancel_order(c: &mut Criterion) {
    c.bench_function("cancel_order_1k", |b| {
        b.iter_batched(
            || populated_ledger(1_000),
            |mut ledger| {
                for id in 0..1_000u64 {
                    black_box(ledger.cancel_order(id));
                }
                ledger
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_index_insert,
    bench_create_order,
    bench_queries,
    bench_cancel_order
);
criterion_main!(benches);
