//! Example walking through the retention counter of a bounded memoization cache.
//!
//! Each bucket holds one resident plus a counter: hits raise it, colliding
//! misses lower it, and only a miss on a zero counter replaces the resident.
//!
//! Run with: cargo run --example basic_bounded
//! Set `RUST_LOG=memokit=trace` to see every slot transition.

use memokit::policy::bounded::BoundedCache;
use memokit::traits::ReadOnlyCache;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Bounded Memoization Cache Example ===\n");

    // Capacity 1: every key lands in the same bucket.
    let mut cache: BoundedCache<&str, String> = BoundedCache::new(1);
    println!("Created cache: capacity={}\n", cache.capacity());

    let mut produce_calls = 0;
    let mut lookup = |cache: &mut BoundedCache<&'static str, String>, key: &'static str| {
        cache.get_or_insert_with(key, || {
            produce_calls += 1;
            key.to_uppercase()
        })
    };

    println!("get(\"a\") -> {}  (miss, admitted)", lookup(&mut cache, "a"));
    println!("get(\"a\") -> {}  (hit)", lookup(&mut cache, "a"));
    println!("  retention(\"a\") = {:?}", cache.retention(&"a"));

    println!("\nColliding key \"b\"...");
    for round in 1..=3 {
        let v = lookup(&mut cache, "b");
        println!(
            "  round {}: get(\"b\") -> {}, resident a? {}, b? {}",
            round,
            v,
            cache.contains(&"a"),
            cache.contains(&"b")
        );
    }
    println!("  retention(\"b\") = {:?}", cache.retention(&"b"));
    println!("  producer ran {} times", produce_calls);

    println!("\n=== Two buckets ===\n");

    let mut cache = BoundedCache::new(2);
    for _ in 0..4 {
        cache.get_or_insert_with("a", || "A");
    }
    for _ in 0..3 {
        cache.get_or_insert_with("b", || "B");
    }
    for _ in 0..5 {
        cache.get_or_insert_with("c", || "C");
    }
    for idx in 0..cache.capacity() {
        println!("  bucket {}: counter {:?}", idx, cache.slot_counter(idx));
    }
    for key in ["a", "b", "c"] {
        println!(
            "  {:?}: bucket {}, resident {:?}",
            key,
            cache.bucket_of(&key),
            cache.peek(&key)
        );
    }
    println!("  {:?}", cache);

    #[cfg(feature = "metrics")]
    {
        let snap = cache.metrics_snapshot();
        println!(
            "\nMetrics: {} calls, hit ratio {:.2}, {} decays, {} replacements",
            snap.get_calls,
            snap.hit_ratio(),
            snap.decays,
            snap.replacements
        );
    }
}
