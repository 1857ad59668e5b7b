//! memokit: bounded-space memoization with per-bucket retention counters.
//!
//! The core type is [`BoundedCache`](policy::bounded::BoundedCache): a
//! direct-mapped table where each bucket keeps one resident and a counter
//! that decides how many colliding misses the resident survives.
//!
//! ## Features
//!
//! - `metrics`: hit/miss/decay counters, snapshots and a Prometheus text
//!   exporter.
//! - `concurrency`: `ConcurrentBoundedCache` with per-slot locks.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
