//! Key-to-bucket mapping for direct-mapped tables.
//!
//! Every key has exactly one candidate bucket: `hash(key) mod buckets`. There
//! is no probing and no chaining, so two keys that land in the same bucket
//! contend for it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bucket Selection Flow                            │
//! │                                                                         │
//! │   Input Key                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   ┌───────────────────────────────────────────────────────────────┐     │
//! │   │  BucketSelector { buckets: 4, hasher: FxBuildHasher }         │     │
//! │   │                                                               │     │
//! │   │  1. h = hasher.hash_one(key)                                  │     │
//! │   │  2. idx = h % 4                                               │     │
//! │   └───────────────────────────────────────────────────────────────┘     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   Bucket Index: 0, 1, 2, or 3                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use memokit::ds::BucketSelector;
//!
//! let selector = BucketSelector::new(8);
//!
//! let bucket = selector.bucket_for_key(&"user:123");
//! assert!(bucket < 8);
//!
//! // Same key always maps to same bucket
//! assert_eq!(selector.bucket_for_key(&"user:123"), bucket);
//! ```

use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

/// Deterministic bucket selector over a caller-chosen [`BuildHasher`].
///
/// Maps any `Hash`able key to a bucket index in `[0, buckets)`. For a fixed
/// hasher state the mapping never changes, which is what lets a resident key
/// be found again on the next lookup.
#[derive(Debug, Clone)]
pub struct BucketSelector<S = FxBuildHasher> {
    buckets: usize,
    hasher: S,
}

impl BucketSelector<FxBuildHasher> {
    /// Creates a selector for `buckets` buckets using `FxBuildHasher`.
    ///
    /// The bucket count is clamped to at least 1.
    pub fn new(buckets: usize) -> Self {
        Self::with_hasher(buckets, FxBuildHasher)
    }
}

impl<S: BuildHasher> BucketSelector<S> {
    /// Creates a selector for `buckets` buckets with a custom hasher.
    ///
    /// The bucket count is clamped to at least 1.
    pub fn with_hasher(buckets: usize, hasher: S) -> Self {
        Self {
            buckets: buckets.max(1),
            hasher,
        }
    }

    /// Returns the number of buckets.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets
    }

    /// Returns the hasher used for selection.
    #[inline]
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Changes the bucket count, keeping the hasher. Clamped to at least 1.
    ///
    /// Existing bucket assignments are meaningless afterwards; callers must
    /// rebuild whatever table the indices refer to.
    pub fn set_bucket_count(&mut self, buckets: usize) {
        self.buckets = buckets.max(1);
    }

    /// Maps a key to a bucket index in `[0, buckets)`.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::ds::BucketSelector;
    ///
    /// let selector = BucketSelector::new(4);
    /// let bucket = selector.bucket_for_key(&12345_u64);
    /// assert!(bucket < 4);
    /// assert_eq!(selector.bucket_for_key(&12345_u64), bucket);
    /// ```
    #[inline]
    pub fn bucket_for_key<K: Hash + ?Sized>(&self, key: &K) -> usize {
        (self.hasher.hash_one(key) % self.buckets as u64) as usize
    }
}

impl Default for BucketSelector<FxBuildHasher> {
    /// Creates a single-bucket selector.
    fn default() -> Self {
        Self::new(1)
    }
}
