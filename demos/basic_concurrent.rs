//! Example sharing a bounded memoization cache across threads.
//!
//! Run with: cargo run --example basic_concurrent

use std::thread;
use std::time::Duration;

use memokit::builder::BoundedCacheBuilder;
use memokit::policy::bounded::ConcurrentBoundedCache;

fn slow_square(n: u64) -> u64 {
    thread::sleep(Duration::from_millis(1));
    n * n
}

fn main() {
    println!("=== Concurrent Bounded Cache Example ===\n");

    let cache: ConcurrentBoundedCache<u64, u64> = BoundedCacheBuilder::new(32).build_concurrent();

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                let mut sum = 0;
                for i in 0..200u64 {
                    let key = (i * (t + 1)) % 48;
                    sum += cache.get_or_insert_with(key, || slow_square(key));
                }
                sum
            })
        })
        .collect();

    for (t, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(sum) => println!("thread {}: sum of squares {}", t, sum),
            Err(_) => println!("thread {} panicked", t),
        }
    }

    println!("\nresident entries: {} of {}", cache.len(), cache.capacity());

    #[cfg(feature = "metrics")]
    {
        use memokit::metrics::exporter::PrometheusTextExporter;
        use memokit::metrics::traits::MetricsExporter;

        let exporter = PrometheusTextExporter::new("memo", Vec::new());
        exporter.export(&cache.metrics_snapshot());
        println!("\n{}", String::from_utf8_lossy(&exporter.into_inner()));
    }
}
