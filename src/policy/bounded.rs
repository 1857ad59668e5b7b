//! Bounded-space memoization with per-bucket retention counters.
//!
//! A direct-mapped table where every bucket holds at most one resident entry
//! plus an unsigned *retention counter*. Instead of ordering entries (LRU) or
//! counting them globally (LFU), each bucket decides on its own whether a
//! newly computed value is worth keeping.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                     BoundedCache<K, V, S> Layout                            │
//! │                                                                             │
//! │   selector: BucketSelector<S>        table: SlotTable<K, V>                 │
//! │     idx = hash(key) % capacity                                              │
//! │                                      ┌───────┬──────────────┬─────────┐     │
//! │                                      │ idx   │ resident     │ counter │     │
//! │                                      ├───────┼──────────────┼─────────┤     │
//! │                                      │   0   │ ("a", A)     │    3    │     │
//! │                                      │   1   │ (empty)      │    0    │     │
//! │                                      │   2   │ ("q", Q)     │    0    │ ◄── next colliding miss wins
//! │                                      │   3   │ ("z", Z)     │    1    │     │
//! │                                      └───────┴──────────────┴─────────┘     │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm
//!
//! ```text
//! GET_OR_INSERT_WITH(key, produce):
//!   idx = hash(key) % capacity
//!   if slot[idx] holds key:                       // hit (key equality, not hash)
//!     slot[idx].counter += 1                      // saturates at max_retention
//!     return slot[idx].value
//!   v = produce()                                 // miss: exactly one call
//!   if slot[idx].counter == 0:
//!     slot[idx] = (key, v, counter = 1)           // admit or replace
//!   else:
//!     slot[idx].counter -= 1                      // age resident, drop v
//!   return v
//! ```
//!
//! A resident with counter `C` survives exactly `C` colliding misses; the
//! `(C+1)`-th one replaces it. Heavy collision rates degrade the cache to
//! "always miss", which is the accepted cost of O(1) memory per bucket.
//!
//! The producer is always called on a miss, even when its result is about to
//! be discarded, because callers rely on getting a fresh value for their key.
//!
//! ## Performance Characteristics
//!
//! | Operation            | Time    | Notes                              |
//! |----------------------|---------|------------------------------------|
//! | `get_or_insert_with` | O(1)    | One hash, one slot                 |
//! | `contains` / `peek`  | O(1)    | Does not touch the counter         |
//! | `len`                | O(n)    | Counts occupied slots              |
//! | `clear` / `resize`   | O(n)    | Rebuilds the table                 |
//!
//! ## Thread Safety
//!
//! - [`BoundedCache`]: not thread-safe; wrap in a `Mutex` for shared use.
//! - `ConcurrentBoundedCache` (feature `concurrency`): per-slot locks, the
//!   producer runs outside any lock.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::policy::bounded::BoundedCache;
//!
//! let mut cache = BoundedCache::new(1024);
//!
//! let mut expensive_calls = 0;
//! let mut slow_square = |n: u64| {
//!     expensive_calls += 1;
//!     n * n
//! };
//!
//! assert_eq!(cache.get_or_insert_with(12, || slow_square(12)), 144);
//! assert_eq!(cache.get_or_insert_with(12, || slow_square(12)), 144);
//! assert_eq!(expensive_calls, 1);
//! assert_eq!(cache.retention(&12), Some(2));
//! ```

use std::convert::Infallible;
use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use crate::ds::{BucketSelector, MissOutcome, SlotTable};
use crate::error::{ConfigError, InvariantError};
use crate::traits::{MemoCache, ReadOnlyCache};

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::BoundedMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::BoundedMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    BoundedMetricsReadRecorder, BoundedMetricsRecorder, CoreMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};

#[cfg(feature = "concurrency")]
use crate::ds::Slot;
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
#[cfg(all(feature = "concurrency", feature = "metrics"))]
use crate::metrics::metrics_impl::ConcurrentBoundedMetrics;
#[cfg(feature = "concurrency")]
use parking_lot::{Mutex, RwLock};
#[cfg(feature = "concurrency")]
use std::sync::Arc;

/// Default retention cap: counters never wrap, they stop at `u64::MAX`.
pub const DEFAULT_MAX_RETENTION: u64 = u64::MAX;

/// Fixed-capacity memoization cache with per-bucket retention counters.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Hash + Eq`. Equal keys must hash equally.
/// - `V`: Value type. `get_or_insert_with` returns clones of resident values,
///   so large values are usually stored as `Arc<T>`.
/// - `S`: Hash builder, defaults to [`FxBuildHasher`].
///
/// # Example
///
/// ```
/// use memokit::policy::bounded::BoundedCache;
/// use memokit::traits::ReadOnlyCache;
///
/// // Capacity 1: every key collides.
/// let mut cache = BoundedCache::new(1);
///
/// assert_eq!(cache.get_or_insert_with("a", || "A"), "A");
/// assert_eq!(cache.get_or_insert_with("a", || "A2"), "A"); // hit, counter 2
/// assert_eq!(cache.get_or_insert_with("b", || "B"), "B");  // counter 1
/// assert_eq!(cache.get_or_insert_with("b", || "B"), "B");  // counter 0
/// assert!(cache.contains(&"a"));
/// assert_eq!(cache.get_or_insert_with("b", || "B"), "B");  // "b" takes the slot
/// assert!(cache.contains(&"b"));
/// ```
pub struct BoundedCache<K, V, S = FxBuildHasher> {
    table: SlotTable<K, V>,
    selector: BucketSelector<S>,
    max_retention: u64,
    #[cfg(feature = "metrics")]
    metrics: BoundedMetrics,
}

impl<K, V> BoundedCache<K, V, FxBuildHasher>
where
    K: Hash + Eq,
{
    /// Creates a cache with `capacity` empty slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) for a
    /// non-panicking alternative.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::bounded::BoundedCache;
    /// use memokit::traits::ReadOnlyCache;
    ///
    /// let cache: BoundedCache<String, i32> = BoundedCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, FxBuildHasher)
    }

    /// Creates a cache with `capacity` empty slots, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_hasher(capacity, FxBuildHasher)
    }
}

impl<K, V, S> BoundedCache<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a cache that buckets keys with `hasher`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        match Self::try_with_hasher(capacity, hasher) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache that buckets keys with `hasher`, rejecting zero capacity.
    pub fn try_with_hasher(capacity: usize, hasher: S) -> Result<Self, ConfigError> {
        Self::try_with_config(capacity, hasher, DEFAULT_MAX_RETENTION)
    }

    pub(crate) fn try_with_config(
        capacity: usize,
        hasher: S,
        max_retention: u64,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        debug!(capacity, max_retention, "created bounded cache");
        Ok(Self {
            table: SlotTable::new(capacity),
            selector: BucketSelector::with_hasher(capacity, hasher),
            max_retention,
            #[cfg(feature = "metrics")]
            metrics: BoundedMetrics::default(),
        })
    }

    /// Returns the counter value at which hits stop incrementing.
    #[inline]
    pub fn max_retention(&self) -> u64 {
        self.max_retention
    }

    /// Returns the hash builder.
    #[inline]
    pub fn hasher(&self) -> &S {
        self.selector.hasher()
    }

    /// Returns the bucket `key` maps to under the current capacity.
    #[inline]
    pub fn bucket_of(&self, key: &K) -> usize {
        self.selector.bucket_for_key(key)
    }

    /// Returns the resident value for `key` without touching its counter.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::bounded::BoundedCache;
    ///
    /// let mut cache = BoundedCache::new(4);
    /// cache.get_or_insert_with(1, || "one");
    ///
    /// assert_eq!(cache.peek(&1), Some(&"one"));
    /// assert_eq!(cache.retention(&1), Some(1)); // unchanged by peek
    /// assert_eq!(cache.peek(&2), None);
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let found = self.table.slot(self.bucket_of(key)).lookup(key);

        #[cfg(feature = "metrics")]
        if found.is_some() {
            self.metrics.record_peek_found();
        }

        found
    }

    /// Returns the retention counter of `key`'s slot if `key` is resident.
    pub fn retention(&self, key: &K) -> Option<u64> {
        let slot = self.table.slot(self.bucket_of(key));
        slot.holds(key).then(|| slot.counter())
    }

    /// Returns the raw counter of bucket `idx`, or `None` if out of range.
    ///
    /// Unlike [`retention`](Self::retention) this reports decayed residents
    /// and empty slots (counter 0) too.
    pub fn slot_counter(&self, idx: usize) -> Option<u64> {
        self.table.get(idx).map(|slot| slot.counter())
    }

    /// Verifies the slot table is well-formed.
    ///
    /// Checks that the table length matches the bucket count, empty slots
    /// carry counter 0, no counter exceeds the retention cap, and every
    /// resident lives in its own bucket.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.table.len() != self.selector.bucket_count() {
            return Err(InvariantError::new(format!(
                "table length {} != bucket count {}",
                self.table.len(),
                self.selector.bucket_count()
            )));
        }
        if self.table.is_empty() {
            return Err(InvariantError::new("table has no slots"));
        }
        for (idx, slot) in self.table.iter().enumerate() {
            if slot.counter() > self.max_retention {
                return Err(InvariantError::new(format!(
                    "bucket {}: counter {} exceeds max retention {}",
                    idx,
                    slot.counter(),
                    self.max_retention
                )));
            }
            match slot.key() {
                None if slot.counter() != 0 => {
                    return Err(InvariantError::new(format!(
                        "bucket {}: empty slot with counter {}",
                        idx,
                        slot.counter()
                    )));
                },
                Some(key) if self.bucket_of(key) != idx => {
                    return Err(InvariantError::new(format!(
                        "bucket {}: resident belongs to bucket {}",
                        idx,
                        self.bucket_of(key)
                    )));
                },
                _ => {},
            }
        }
        Ok(())
    }
}

impl<K, V, S> BoundedCache<K, V, S>
where
    K: Hash + Eq,
    V: Clone,
    S: BuildHasher,
{
    /// Returns the resident value for `key`, or calls `produce` once.
    ///
    /// On a hit the slot's counter is incremented and `produce` is never
    /// called. On a miss `produce` is called exactly once and its value is
    /// returned; the value is stored only if the slot's counter is 0,
    /// otherwise the resident is aged by one.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::bounded::BoundedCache;
    ///
    /// let mut cache = BoundedCache::new(16);
    /// let v = cache.get_or_insert_with("answer".to_string(), || 42);
    /// assert_eq!(v, 42);
    /// ```
    pub fn get_or_insert_with<F>(&mut self, key: K, produce: F) -> V
    where
        F: FnOnce() -> V,
    {
        match self.try_get_or_insert_with(key, || Ok::<V, Infallible>(produce())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with) with a fallible
    /// producer.
    ///
    /// An `Err` from `produce` is returned unchanged and the slot is left
    /// exactly as it was: no decay, no replacement.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::bounded::BoundedCache;
    /// use memokit::traits::ReadOnlyCache;
    ///
    /// let mut cache: BoundedCache<&str, u32> = BoundedCache::new(4);
    ///
    /// let err = cache.try_get_or_insert_with("x", || "12a".parse::<u32>());
    /// assert!(err.is_err());
    /// assert!(!cache.contains(&"x"));
    ///
    /// let ok = cache.try_get_or_insert_with("x", || "12".parse::<u32>());
    /// assert_eq!(ok, Ok(12));
    /// ```
    pub fn try_get_or_insert_with<F, E>(&mut self, key: K, produce: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let idx = self.selector.bucket_for_key(&key);
        let max_retention = self.max_retention;

        let slot = self.table.slot_mut(idx);
        if slot.holds(&key) {
            let saturated = slot.counter() >= max_retention;
            if let Some(value) = slot.on_hit(max_retention) {
                let value = value.clone();
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_get_hit();
                    if saturated {
                        self.metrics.record_saturated_hit();
                    }
                }
                #[cfg(not(feature = "metrics"))]
                let _ = saturated;
                return Ok(value);
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_get_miss();

        let value = match produce() {
            Ok(value) => value,
            Err(err) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_producer_error();
                return Err(err);
            },
        };

        match self.table.slot_mut(idx).on_miss(key, &value) {
            MissOutcome::Admitted => {
                trace!(bucket = idx, "admitted into empty slot");
                #[cfg(feature = "metrics")]
                self.metrics.record_admission();
            },
            MissOutcome::Replaced => {
                trace!(bucket = idx, "replaced decayed resident");
                #[cfg(feature = "metrics")]
                self.metrics.record_replacement();
            },
            MissOutcome::Decayed { remaining } => {
                trace!(bucket = idx, counter = remaining, "aged resident, value not kept");
                #[cfg(feature = "metrics")]
                self.metrics.record_decay();
            },
        }

        Ok(value)
    }
}

impl<K, V, S> BoundedCache<K, V, S>
where
    S: BuildHasher,
{
    /// Empties every slot. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.table.reset();
        debug!(capacity = self.table.len(), "cleared bounded cache");
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Replaces the table with `new_capacity` empty slots.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `new_capacity` is zero; the cache is left
    /// untouched in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::bounded::BoundedCache;
    /// use memokit::traits::ReadOnlyCache;
    ///
    /// let mut cache = BoundedCache::new(4);
    /// cache.get_or_insert_with(1, || 1);
    ///
    /// cache.resize(16).unwrap();
    /// assert_eq!(cache.capacity(), 16);
    /// assert!(cache.is_empty());
    ///
    /// assert!(cache.resize(0).is_err());
    /// assert_eq!(cache.capacity(), 16);
    /// ```
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), ConfigError> {
        if new_capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        let old_capacity = self.table.len();
        self.table = SlotTable::new(new_capacity);
        self.selector.set_bucket_count(new_capacity);
        debug!(old_capacity, new_capacity, "resized bounded cache");
        #[cfg(feature = "metrics")]
        self.metrics.record_resize();
        Ok(())
    }
}

impl<K, V, S> ReadOnlyCache<K> for BoundedCache<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if `key` is resident. Does not touch the counter.
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.table.slot(self.bucket_of(key)).holds(key)
    }

    /// Number of occupied slots, including decayed residents. O(capacity).
    fn len(&self) -> usize {
        self.table.occupied()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.table.len()
    }
}

impl<K, V, S> MemoCache<K, V> for BoundedCache<K, V, S>
where
    K: Hash + Eq,
    V: Clone,
    S: BuildHasher,
{
    #[inline]
    fn get_or_insert_with<F>(&mut self, key: K, produce: F) -> V
    where
        F: FnOnce() -> V,
    {
        BoundedCache::get_or_insert_with(self, key, produce)
    }

    #[inline]
    fn try_get_or_insert_with<F, E>(&mut self, key: K, produce: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        BoundedCache::try_get_or_insert_with(self, key, produce)
    }

    fn clear(&mut self) {
        BoundedCache::clear(self);
    }

    fn resize(&mut self, new_capacity: usize) -> Result<(), ConfigError> {
        BoundedCache::resize(self, new_capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> BoundedCache<K, V, S> {
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> BoundedMetricsSnapshot {
        self.metrics.snapshot(self.table.occupied(), self.table.len())
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> MetricsSnapshotProvider<BoundedMetricsSnapshot> for BoundedCache<K, V, S> {
    fn snapshot(&self) -> BoundedMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> MetricsReset for BoundedCache<K, V, S> {
    fn reset_metrics(&mut self) {
        self.metrics = BoundedMetrics::default();
    }
}

impl<K, V, S> Debug for BoundedCache<K, V, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("capacity", &self.table.len())
            .field("len", &self.table.occupied())
            .field("max_retention", &self.max_retention)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ConcurrentBoundedCache
// ---------------------------------------------------------------------------

#[cfg(feature = "concurrency")]
struct LockedTable<K, V, S> {
    selector: BucketSelector<S>,
    slots: Box<[Mutex<Slot<K, V>>]>,
}

#[cfg(feature = "concurrency")]
impl<K, V, S: BuildHasher> LockedTable<K, V, S> {
    fn new(capacity: usize, selector: BucketSelector<S>) -> Self {
        let slots = (0..capacity).map(|_| Mutex::new(Slot::empty())).collect();
        Self { selector, slots }
    }

    #[inline]
    fn slot_for<Q: Hash>(&self, key: &Q) -> (usize, &Mutex<Slot<K, V>>) {
        let idx = self.selector.bucket_for_key(key);
        (idx, &self.slots[idx])
    }

    fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.lock().is_occupied()).count()
    }
}

#[cfg(feature = "concurrency")]
struct Shared<K, V, S> {
    table: RwLock<LockedTable<K, V, S>>,
    max_retention: u64,
    #[cfg(feature = "metrics")]
    metrics: ConcurrentBoundedMetrics,
}

/// Thread-safe bounded cache with one lock per slot.
///
/// The slot table sits behind a `parking_lot::RwLock` that is only taken for
/// writing by [`clear`](Self::clear) and [`resize`](Self::resize); every
/// lookup takes it for reading and then locks the single slot it touches.
///
/// A miss releases the slot lock while `produce` runs, then re-locks and
/// applies the miss against the slot's *current* state. If another thread
/// admitted the same key in the meantime, the slot is left alone. Each
/// transition runs inside one critical section, so counters are never lost
/// and a resident is never evicted twice.
///
/// Cloning shares the underlying table.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use memokit::policy::bounded::ConcurrentBoundedCache;
///
/// let cache = Arc::new(ConcurrentBoundedCache::new(64));
///
/// let handles: Vec<_> = (0..4u64)
///     .map(|t| {
///         let cache = Arc::clone(&cache);
///         thread::spawn(move || cache.get_or_insert_with(t, || t * 10))
///     })
///     .collect();
///
/// for (t, h) in handles.into_iter().enumerate() {
///     assert_eq!(h.join().unwrap(), t as u64 * 10);
/// }
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentBoundedCache<K, V, S = FxBuildHasher> {
    inner: Arc<Shared<K, V, S>>,
}

#[cfg(feature = "concurrency")]
impl<K, V, S> Clone for ConcurrentBoundedCache<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentBoundedCache<K, V, FxBuildHasher>
where
    K: Hash + Eq,
{
    /// Creates a concurrent cache with `capacity` empty slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, FxBuildHasher)
    }

    /// Creates a concurrent cache, rejecting zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_hasher(capacity, FxBuildHasher)
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, S> ConcurrentBoundedCache<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a concurrent cache that buckets keys with `hasher`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        match Self::try_with_hasher(capacity, hasher) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_with_hasher(capacity: usize, hasher: S) -> Result<Self, ConfigError> {
        Self::try_with_config(capacity, hasher, DEFAULT_MAX_RETENTION)
    }

    pub(crate) fn try_with_config(
        capacity: usize,
        hasher: S,
        max_retention: u64,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        debug!(capacity, max_retention, "created concurrent bounded cache");
        let selector = BucketSelector::with_hasher(capacity, hasher);
        Ok(Self {
            inner: Arc::new(Shared {
                table: RwLock::new(LockedTable::new(capacity, selector)),
                max_retention,
                #[cfg(feature = "metrics")]
                metrics: ConcurrentBoundedMetrics::default(),
            }),
        })
    }

    #[inline]
    pub fn max_retention(&self) -> u64 {
        self.inner.max_retention
    }

    /// Returns the retention counter of `key`'s slot if `key` is resident.
    pub fn retention(&self, key: &K) -> Option<u64> {
        let table = self.inner.table.read();
        let (_, slot) = table.slot_for(key);
        let slot = slot.lock();
        let counter = if slot.holds(key) {
            Some(slot.counter())
        } else {
            None
        };
        counter
    }

    /// Returns `true` if `key` is resident. Does not touch the counter.
    pub fn contains(&self, key: &K) -> bool {
        let table = self.inner.table.read();
        let (_, slot) = table.slot_for(key);
        let held = slot.lock().holds(key);
        held
    }

    /// Number of occupied slots. Locks each slot in turn, so the count is
    /// only a point-in-time estimate under concurrent writes.
    pub fn len(&self) -> usize {
        self.inner.table.read().occupied()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.table.read().slots.len()
    }

    /// Empties every slot. Waits for in-flight slot transitions to finish.
    pub fn clear(&self) {
        let mut table = self.inner.table.write();
        for slot in table.slots.iter_mut() {
            *slot.get_mut() = Slot::empty();
        }
        debug!(capacity = table.slots.len(), "cleared concurrent bounded cache");
        #[cfg(feature = "metrics")]
        self.inner.metrics.inc_clear();
    }

    /// Replaces the table with `new_capacity` empty slots.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `new_capacity` is zero; the cache is left
    /// untouched in that case.
    pub fn resize(&self, new_capacity: usize) -> Result<(), ConfigError> {
        if new_capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        let mut table = self.inner.table.write();
        let old_capacity = table.slots.len();
        table.selector.set_bucket_count(new_capacity);
        table.slots = (0..new_capacity)
            .map(|_| Mutex::new(Slot::empty()))
            .collect();
        debug!(old_capacity, new_capacity, "resized concurrent bounded cache");
        #[cfg(feature = "metrics")]
        self.inner.metrics.inc_resize();
        Ok(())
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, S> ConcurrentBoundedCache<K, V, S>
where
    K: Hash + Eq,
    V: Clone,
    S: BuildHasher,
{
    /// Returns the resident value for `key`, or calls `produce` once.
    ///
    /// Same transitions as [`BoundedCache::get_or_insert_with`]; `produce`
    /// runs without any lock held.
    pub fn get_or_insert_with<F>(&self, key: K, produce: F) -> V
    where
        F: FnOnce() -> V,
    {
        match self.try_get_or_insert_with(key, || Ok::<V, Infallible>(produce())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant; an `Err` leaves the slot untouched.
    pub fn try_get_or_insert_with<F, E>(&self, key: K, produce: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let max_retention = self.inner.max_retention;

        {
            let table = self.inner.table.read();
            let (_, slot) = table.slot_for(&key);
            let mut slot = slot.lock();
            if slot.holds(&key) {
                let saturated = slot.counter() >= max_retention;
                if let Some(value) = slot.on_hit(max_retention) {
                    let value = value.clone();
                    #[cfg(feature = "metrics")]
                    {
                        self.inner.metrics.inc_hit();
                        if saturated {
                            self.inner.metrics.inc_saturated_hit();
                        }
                    }
                    #[cfg(not(feature = "metrics"))]
                    let _ = saturated;
                    return Ok(value);
                }
            }
        }

        #[cfg(feature = "metrics")]
        self.inner.metrics.inc_miss();

        let value = match produce() {
            Ok(value) => value,
            Err(err) => {
                #[cfg(feature = "metrics")]
                self.inner.metrics.inc_producer_error();
                return Err(err);
            },
        };

        // The table may have been cleared or resized while `produce` ran, so
        // the bucket is recomputed under the new read guard.
        let table = self.inner.table.read();
        let (idx, slot) = table.slot_for(&key);
        let mut slot = slot.lock();
        if slot.holds(&key) {
            trace!(bucket = idx, "key admitted concurrently, slot left as is");
            #[cfg(feature = "metrics")]
            self.inner.metrics.inc_lost_race();
            return Ok(value);
        }

        match slot.on_miss(key, &value) {
            MissOutcome::Admitted => {
                trace!(bucket = idx, "admitted into empty slot");
                #[cfg(feature = "metrics")]
                self.inner.metrics.inc_admission();
            },
            MissOutcome::Replaced => {
                trace!(bucket = idx, "replaced decayed resident");
                #[cfg(feature = "metrics")]
                self.inner.metrics.inc_replacement();
            },
            MissOutcome::Decayed { remaining } => {
                trace!(bucket = idx, counter = remaining, "aged resident, value not kept");
                #[cfg(feature = "metrics")]
                self.inner.metrics.inc_decay();
            },
        }

        Ok(value)
    }
}

#[cfg(all(feature = "concurrency", feature = "metrics"))]
impl<K, V, S> ConcurrentBoundedCache<K, V, S>
where
    S: BuildHasher,
{
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> BoundedMetricsSnapshot {
        let table = self.inner.table.read();
        self.inner.metrics.snapshot(table.occupied(), table.slots.len())
    }

    /// Zeroes every counter.
    pub fn reset_metrics(&self) {
        self.inner.metrics.reset();
    }
}

#[cfg(all(feature = "concurrency", feature = "metrics"))]
impl<K, V, S> MetricsSnapshotProvider<BoundedMetricsSnapshot> for ConcurrentBoundedCache<K, V, S>
where
    S: BuildHasher,
{
    fn snapshot(&self) -> BoundedMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, S> ConcurrentCache for ConcurrentBoundedCache<K, V, S>
where
    K: Send,
    V: Send,
    S: Send + Sync,
{
}

#[cfg(feature = "concurrency")]
impl<K, V, S> Debug for ConcurrentBoundedCache<K, V, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let table = self.inner.table.read();
        f.debug_struct("ConcurrentBoundedCache")
            .field("capacity", &table.slots.len())
            .field("max_retention", &self.inner.max_retention)
            .finish()
    }
}
