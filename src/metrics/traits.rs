//! # Metrics Trait Hierarchy
//!
//! Mirrors the cache trait design by separating *recording*, *snapshotting*,
//! and *export* responsibilities into small traits.
//!
//! ```text
//!              ┌─────────────────────────────┐
//!              │     CoreMetricsRecorder     │
//!              │  get_hit / get_miss / clear │
//!              └──────────────┬──────────────┘
//!                             │
//!                             ▼
//!              ┌─────────────────────────────┐
//!              │   BoundedMetricsRecorder    │
//!              │  admission / replacement    │
//!              │  decay / saturated_hit      │
//!              │  producer_error / resize    │
//!              └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Common counters for any memoizing cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_clear(&mut self);
}

/// Counters specific to retention-counter eviction.
pub trait BoundedMetricsRecorder: CoreMetricsRecorder {
    /// A miss stored its value in an empty slot.
    fn record_admission(&mut self);
    /// A miss overwrote a resident whose counter had decayed to zero.
    fn record_replacement(&mut self);
    /// A miss aged a resident instead of storing its value.
    fn record_decay(&mut self);
    /// A hit found the counter already at the retention cap.
    fn record_saturated_hit(&mut self);
    /// A fallible producer returned an error.
    fn record_producer_error(&mut self);
    fn record_resize(&mut self);
}

/// Read-only counters for `&self` methods (uses interior mutability).
pub trait BoundedMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
}

/// Produce a point-in-time snapshot.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Publish a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
