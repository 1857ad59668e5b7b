//! Observability for memoizing caches (feature `metrics`).
//!
//! Recording, snapshotting and exporting are separate concerns:
//!
//! - [`traits`]: recorder, snapshot-provider and exporter traits.
//! - [`metrics_impl`]: concrete counters owned by each cache.
//! - [`snapshot`]: plain `Copy` structs captured at a point in time.
//! - [`exporter`]: Prometheus text exposition of snapshots.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
