//! Benchmarks for BoundedCache and ConcurrentBoundedCache.
//!
//! Run with: `cargo bench --bench bounded`

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use memokit::policy::bounded::{BoundedCache, ConcurrentBoundedCache};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Key streams
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Workload {
    /// Uniform random keys in `[0, universe)`.
    Uniform,
    /// `hot_prob` of accesses go to the first `hot_fraction` of the universe.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Sequential scan in `[0, universe)`.
    Scan,
}

fn key_stream(workload: Workload, universe: u64, len: usize, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    match workload {
        Workload::Uniform => (0..len).map(|_| rng.gen_range(0..universe)).collect(),
        Workload::Hotset {
            hot_fraction,
            hot_prob,
        } => {
            let hot = ((universe as f64 * hot_fraction) as u64).max(1);
            (0..len)
                .map(|_| {
                    if rng.gen_bool(hot_prob) {
                        rng.gen_range(0..hot)
                    } else {
                        rng.gen_range(hot..universe.max(hot + 1))
                    }
                })
                .collect()
        },
        Workload::Scan => (0..len as u64).map(|i| i % universe).collect(),
    }
}

// ============================================================================
// Hit path (pure read performance)
// ============================================================================

fn bench_bounded_get_hit_ns(c: &mut Criterion) {
    c.bench_function("bounded_get_hit_ns", |b| {
        b.iter_custom(|iters| {
            let capacity = 16_384u64;
            let mut cache = BoundedCache::new(capacity as usize);
            for i in 0..capacity {
                cache.get_or_insert_with(i, || Arc::new(i));
            }
            let resident: Vec<u64> = (0..capacity)
                .filter(|k| cache.peek(k).is_some())
                .collect();
            let start = Instant::now();
            for i in 0..iters {
                let key = resident[(i as usize) % resident.len()];
                let _ = std::hint::black_box(cache.get_or_insert_with(key, || Arc::new(0)));
            }
            start.elapsed()
        })
    });
}

// ============================================================================
// Miss path (every call collides)
// ============================================================================

fn bench_bounded_collision_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_policy");
    group.throughput(Throughput::Elements(4096));

    group.bench_function("collision_churn", |b| {
        b.iter_batched(
            || {
                let mut cache = BoundedCache::new(1024);
                for i in 0..1024u64 {
                    cache.get_or_insert_with(i, || i);
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    let key = std::hint::black_box(10_000 + i);
                    let _ = cache.get_or_insert_with(key, || i);
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("warmup_fill", |b| {
        b.iter_batched(
            || BoundedCache::<u64, u64>::new(4096),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = cache.get_or_insert_with(std::hint::black_box(i), || i);
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Workload-based hit rate
// ============================================================================

fn bench_bounded_workload_hit_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_workload_hit_rate");
    let operations = 200_000usize;
    group.throughput(Throughput::Elements(operations as u64));

    let specs = [
        ("uniform", Workload::Uniform),
        (
            "hotset_90_10",
            Workload::Hotset {
                hot_fraction: 0.1,
                hot_prob: 0.9,
            },
        ),
        ("scan", Workload::Scan),
    ];

    for (name, workload) in specs {
        let keys = key_stream(workload, 16_384, operations, 42);
        group.bench_function(name, |b| {
            b.iter_custom(|iters| {
                let mut total = Duration::default();
                for _ in 0..iters {
                    let mut cache = BoundedCache::new(4096);
                    let mut misses = 0u64;
                    let start = Instant::now();
                    for &key in &keys {
                        let _ = cache.get_or_insert_with(key, || {
                            misses += 1;
                            key
                        });
                    }
                    total += start.elapsed();
                    let _ = std::hint::black_box(misses);
                }
                total
            })
        });
    }

    group.finish();
}

// ============================================================================
// Concurrent throughput
// ============================================================================

fn bench_concurrent_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_concurrent");
    let threads = 4usize;
    let ops_per_thread = 10_000usize;
    group.throughput(Throughput::Elements((threads * ops_per_thread) as u64));

    let streams: Vec<Arc<Vec<u64>>> = (0..threads)
        .map(|t| {
            let workload = Workload::Hotset {
                hot_fraction: 0.1,
                hot_prob: 0.9,
            };
            Arc::new(key_stream(workload, 16_384, ops_per_thread, t as u64))
        })
        .collect();

    group.bench_function("hotset_4_threads", |b| {
        b.iter_custom(|iters| {
            let mut total = Duration::default();
            for _ in 0..iters {
                let cache: ConcurrentBoundedCache<u64, u64> = ConcurrentBoundedCache::new(4096);
                let start = Instant::now();
                let handles: Vec<_> = streams
                    .iter()
                    .map(|keys| {
                        let cache = cache.clone();
                        let keys = Arc::clone(keys);
                        thread::spawn(move || {
                            for &key in keys.iter() {
                                let _ = std::hint::black_box(cache.get_or_insert_with(key, || key));
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    let _ = handle.join();
                }
                total += start.elapsed();
            }
            total
        })
    });

    group.finish();
}

criterion_group!(micro_ops, bench_bounded_get_hit_ns, bench_bounded_collision_churn);
criterion_group!(hit_rate, bench_bounded_workload_hit_rate);
criterion_group!(concurrent, bench_concurrent_mixed);
criterion_main!(micro_ops, hit_rate, concurrent);
