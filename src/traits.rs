//! # Cache Trait Hierarchy
//!
//! Memoizing caches are driven by a single call: "give me the value for this
//! key, and here is how to compute it if you don't have it". The traits below
//! split that surface the way the rest of the crate is split:
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │          ReadOnlyCache<K>               │
//!   │                                         │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MemoCache<K, V>                │
//!   │                                         │
//!   │  get_or_insert_with(&mut, K, F) → V     │
//!   │  try_get_or_insert_with(&mut, K, F)     │
//!   │       → Result<V, E>                    │
//!   │  clear(&mut)                            │
//!   │  resize(&mut, usize)                    │
//!   │       → Result<(), ConfigError>         │
//!   └─────────────────────────────────────────┘
//!
//!   ConcurrentCache: marker, Send + Sync
//! ```
//!
//! There is no `insert` and no `remove`: values enter a cache only as the
//! result of a miss, and leave only through decay or a full clear.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::policy::bounded::BoundedCache;
//! use memokit::traits::{MemoCache, ReadOnlyCache};
//!
//! fn square_all<C: MemoCache<u64, u64>>(cache: &mut C, inputs: &[u64]) -> Vec<u64> {
//!     inputs
//!         .iter()
//!         .map(|&n| cache.get_or_insert_with(n, || n * n))
//!         .collect()
//! }
//!
//! let mut cache = BoundedCache::new(16);
//! assert_eq!(square_all(&mut cache, &[2, 3, 2]), vec![4, 9, 4]);
//! assert!(cache.contains(&2));
//! ```
//!
//! ## Thread Safety
//!
//! - [`BoundedCache`](crate::policy::bounded::BoundedCache) is **not**
//!   thread-safe; wrap it in a `Mutex` for shared access.
//! - `ConcurrentBoundedCache` (feature `concurrency`) implements
//!   [`ConcurrentCache`] and exposes the same operations through `&self`.

use crate::error::ConfigError;

/// Read-only inspection shared by every cache in the crate.
///
/// None of these methods affect retention state.
pub trait ReadOnlyCache<K> {
    /// Returns `true` if `key` is currently resident.
    fn contains(&self, key: &K) -> bool;

    /// Returns the number of resident entries.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots.
    fn capacity(&self) -> usize;
}

/// Memoization through a caller-supplied producer.
///
/// # Example
///
/// ```
/// use memokit::policy::bounded::BoundedCache;
/// use memokit::traits::MemoCache;
///
/// let mut cache = BoundedCache::new(8);
/// let mut calls = 0;
///
/// let v = cache.get_or_insert_with("k", || { calls += 1; 7 });
/// assert_eq!(v, 7);
/// let v = cache.get_or_insert_with("k", || { calls += 1; 8 });
/// assert_eq!(v, 7);
/// assert_eq!(calls, 1);
/// ```
pub trait MemoCache<K, V>: ReadOnlyCache<K> {
    /// Returns the retained value for `key`, or calls `produce` exactly once
    /// and returns its result.
    ///
    /// On a miss the produced value is always returned, whether or not the
    /// cache keeps a copy.
    fn get_or_insert_with<F>(&mut self, key: K, produce: F) -> V
    where
        F: FnOnce() -> V;

    /// Like [`get_or_insert_with`](Self::get_or_insert_with) with a fallible
    /// producer. An `Err` is returned unchanged and leaves the cache as it was.
    fn try_get_or_insert_with<F, E>(&mut self, key: K, produce: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>;

    /// Empties every slot; capacity is unchanged.
    fn clear(&mut self);

    /// Replaces the table with `new_capacity` empty slots.
    ///
    /// Zero is rejected and leaves the cache untouched.
    fn resize(&mut self, new_capacity: usize) -> Result<(), ConfigError>;
}

/// Marker for caches that are safe to share between threads.
pub trait ConcurrentCache: Send + Sync {}
