//! Error types for the memokit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a capacity or retention limit is invalid
//!   (zero capacity on construction or resize, zero retention cap).
//! - [`InvariantError`]: Returned by `check_invariants` when the slot table
//!   is not well-formed.
//!
//! Failures raised by a caller-supplied value producer are never wrapped:
//! [`try_get_or_insert_with`](crate::policy::bounded::BoundedCache::try_get_or_insert_with)
//! hands the producer's own error type straight back.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::error::ConfigError;
//! use memokit::policy::bounded::BoundedCache;
//!
//! let cache: Result<BoundedCache<u64, u64>, ConfigError> = BoundedCache::try_new(64);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is rejected without panicking
//! let bad = BoundedCache::<u64, u64>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`BoundedCache::try_new`](crate::policy::bounded::BoundedCache::try_new),
/// by [`BoundedCache::resize`](crate::policy::bounded::BoundedCache::resize)
/// and by the builder's `try_build()`. Carries a human-readable description
/// of which parameter failed validation.
///
/// # Example
///
/// ```
/// use memokit::error::ConfigError;
/// use memokit::policy::bounded::BoundedCache;
///
/// let err = BoundedCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    pub(crate) fn zero_capacity() -> Self {
        Self::new("capacity must be > 0")
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by
/// [`BoundedCache::check_invariants`](crate::policy::bounded::BoundedCache::check_invariants).
/// Carries a description of which invariant failed and at which bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be > 0");
        assert_eq!(err.to_string(), "capacity must be > 0");
    }

    #[test]
    fn config_zero_capacity_mentions_capacity() {
        let err = ConfigError::zero_capacity();
        assert!(err.message().contains("capacity"));
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("bucket 3: empty slot with counter 2");
        assert_eq!(err.to_string(), "bucket 3: empty slot with counter 2");
    }

    #[test]
    fn invariant_debug_includes_message() {
        let err = InvariantError::new("misplaced key");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("misplaced key"));
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
