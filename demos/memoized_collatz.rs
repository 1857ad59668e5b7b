//! Example memoizing an expensive, fallible function with a bounded cache.
//!
//! Run with: cargo run --example memoized_collatz

use memokit::builder::BoundedCacheBuilder;
use memokit::policy::bounded::BoundedCache;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
struct Overflow(u64);

/// Number of Collatz steps from `n` down to 1.
fn collatz_steps(mut n: u64) -> Result<u32, Overflow> {
    let start = n;
    let mut steps = 0;
    while n > 1 {
        n = if n % 2 == 0 {
            n / 2
        } else {
            n.checked_mul(3)
                .and_then(|m| m.checked_add(1))
                .ok_or(Overflow(start))?
        };
        steps += 1;
    }
    Ok(steps)
}

fn main() {
    println!("=== Memoized Collatz ===\n");

    let mut cache: BoundedCache<u64, u32> = BoundedCacheBuilder::new(256)
        .max_retention(16)
        .build();

    // Skewed query stream: most lookups hit a small hot set.
    let mut rng = SmallRng::seed_from_u64(7);
    let mut computed = 0;
    let mut longest = (0, 0);
    for _ in 0..10_000 {
        let n = if rng.gen_bool(0.9) {
            rng.gen_range(1..64)
        } else {
            rng.gen_range(1..100_000)
        };
        let steps = match cache.try_get_or_insert_with(n, || {
            computed += 1;
            collatz_steps(n)
        }) {
            Ok(steps) => steps,
            Err(Overflow(n)) => {
                println!("collatz({}) overflowed u64, skipped", n);
                continue;
            },
        };
        if steps > longest.1 {
            longest = (n, steps);
        }
    }
    println!("10000 queries, {} computed", computed);
    println!("longest chain: {} takes {} steps", longest.0, longest.1);

    // Errors are passed through and never cached.
    let huge = u64::MAX - 2;
    match cache.try_get_or_insert_with(huge, || collatz_steps(huge)) {
        Ok(steps) => println!("collatz({}) = {}", huge, steps),
        Err(Overflow(n)) => println!("collatz({}) overflowed u64", n),
    }
    println!("cached after error? {:?}", cache.peek(&huge));

    #[cfg(feature = "metrics")]
    {
        let snap = cache.metrics_snapshot();
        println!(
            "\nhit ratio {:.2}, {} decays, {} replacements, {} of {} slots used",
            snap.hit_ratio(),
            snap.decays,
            snap.replacements,
            snap.cache_len,
            snap.capacity
        );
    }
}
