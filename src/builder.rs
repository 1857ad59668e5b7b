//! Builder for bounded memoization caches.
//!
//! Collects capacity, hasher and retention cap in one place and validates
//! them together, so callers taking these from user configuration get a
//! [`ConfigError`] instead of a panic.
//!
//! ## Example
//!
//! ```rust
//! use memokit::builder::BoundedCacheBuilder;
//!
//! let mut cache = BoundedCacheBuilder::new(1024)
//!     .max_retention(64)
//!     .try_build::<u64, String>()
//!     .unwrap();
//!
//! let v = cache.get_or_insert_with(1, || "hello".to_string());
//! assert_eq!(v, "hello");
//! assert_eq!(cache.max_retention(), 64);
//! ```

use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

use crate::error::ConfigError;
use crate::policy::bounded::{BoundedCache, DEFAULT_MAX_RETENTION};

#[cfg(feature = "concurrency")]
use crate::policy::bounded::ConcurrentBoundedCache;

/// Configuration for [`BoundedCache`] and, with the `concurrency` feature,
/// `ConcurrentBoundedCache`.
///
/// | Setting         | Default          | Constraint |
/// |-----------------|------------------|------------|
/// | `capacity`      | required         | `> 0`      |
/// | `max_retention` | `u64::MAX`       | `> 0`      |
/// | `hasher`        | `FxBuildHasher`  | -          |
#[derive(Debug, Clone)]
pub struct BoundedCacheBuilder<S = FxBuildHasher> {
    capacity: usize,
    max_retention: u64,
    hasher: S,
}

impl BoundedCacheBuilder<FxBuildHasher> {
    /// Starts a builder for a cache with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            max_retention: DEFAULT_MAX_RETENTION,
            hasher: FxBuildHasher,
        }
    }
}

impl<S: BuildHasher> BoundedCacheBuilder<S> {
    /// Uses `hasher` to map keys to buckets.
    pub fn hasher<S2: BuildHasher>(self, hasher: S2) -> BoundedCacheBuilder<S2> {
        BoundedCacheBuilder {
            capacity: self.capacity,
            max_retention: self.max_retention,
            hasher,
        }
    }

    /// Caps the retention counter: hits beyond `max_retention` no longer
    /// raise it, so a resident survives at most `max_retention` collisions.
    pub fn max_retention(mut self, max_retention: u64) -> Self {
        self.max_retention = max_retention;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        if self.max_retention == 0 {
            return Err(ConfigError::new("max_retention must be > 0"));
        }
        Ok(())
    }

    /// Builds the cache, returning an error on invalid settings.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::builder::BoundedCacheBuilder;
    ///
    /// let err = BoundedCacheBuilder::new(0).try_build::<u64, u64>().unwrap_err();
    /// assert!(err.to_string().contains("capacity"));
    ///
    /// let err = BoundedCacheBuilder::new(8)
    ///     .max_retention(0)
    ///     .try_build::<u64, u64>()
    ///     .unwrap_err();
    /// assert!(err.to_string().contains("max_retention"));
    /// ```
    pub fn try_build<K, V>(self) -> Result<BoundedCache<K, V, S>, ConfigError>
    where
        K: Hash + Eq,
    {
        self.validate()?;
        BoundedCache::try_with_config(self.capacity, self.hasher, self.max_retention)
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics on invalid settings. Use [`try_build`](Self::try_build) for a
    /// non-panicking alternative.
    pub fn build<K, V>(self) -> BoundedCache<K, V, S>
    where
        K: Hash + Eq,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds a thread-safe cache, returning an error on invalid settings.
    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent<K, V>(self) -> Result<ConcurrentBoundedCache<K, V, S>, ConfigError>
    where
        K: Hash + Eq,
    {
        self.validate()?;
        ConcurrentBoundedCache::try_with_config(self.capacity, self.hasher, self.max_retention)
    }

    /// Builds a thread-safe cache.
    ///
    /// # Panics
    ///
    /// Panics on invalid settings.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K, V>(self) -> ConcurrentBoundedCache<K, V, S>
    where
        K: Hash + Eq,
    {
        match self.try_build_concurrent() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }
}
