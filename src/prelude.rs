pub use crate::builder::BoundedCacheBuilder;
pub use crate::ds::{BucketSelector, MissOutcome, Slot, SlotTable};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::bounded::{BoundedCache, DEFAULT_MAX_RETENTION};
pub use crate::traits::{ConcurrentCache, MemoCache, ReadOnlyCache};

#[cfg(feature = "concurrency")]
pub use crate::policy::bounded::ConcurrentBoundedCache;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::BoundedMetricsSnapshot;
