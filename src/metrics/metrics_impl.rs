use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::BoundedMetricsSnapshot;
use crate::metrics::traits::{
    BoundedMetricsReadRecorder, BoundedMetricsRecorder, CoreMetricsRecorder,
};

// ---------------------------------------------------------------------------
// BoundedMetrics
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct BoundedMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub admissions: u64,
    pub replacements: u64,
    pub decays: u64,
    pub saturated_hits: u64,
    pub producer_errors: u64,
    pub clears: u64,
    pub resizes: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
}

impl BoundedMetrics {
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> BoundedMetricsSnapshot {
        BoundedMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            admissions: self.admissions,
            replacements: self.replacements,
            decays: self.decays,
            saturated_hits: self.saturated_hits,
            producer_errors: self.producer_errors,
            lost_races: 0,
            peek_calls: self.peek_calls.get(),
            peek_found: self.peek_found.get(),
            clears: self.clears,
            resizes: self.resizes,
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for BoundedMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl BoundedMetricsRecorder for BoundedMetrics {
    fn record_admission(&mut self) {
        self.admissions += 1;
    }
    fn record_replacement(&mut self) {
        self.replacements += 1;
    }
    fn record_decay(&mut self) {
        self.decays += 1;
    }
    fn record_saturated_hit(&mut self) {
        self.saturated_hits += 1;
    }
    fn record_producer_error(&mut self) {
        self.producer_errors += 1;
    }
    fn record_resize(&mut self) {
        self.resizes += 1;
    }
}

impl BoundedMetricsReadRecorder for BoundedMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }
    fn record_peek_found(&self) {
        self.peek_found.incr();
    }
}

// ---------------------------------------------------------------------------
// ConcurrentBoundedMetrics
// ---------------------------------------------------------------------------

/// Atomic counters for the lock-striped cache.
///
/// All counters use `Ordering::Relaxed`; a snapshot taken under load is not a
/// consistent cut across fields.
#[derive(Debug, Default)]
pub struct ConcurrentBoundedMetrics {
    get_hits: AtomicU64,
    get_misses: AtomicU64,
    admissions: AtomicU64,
    replacements: AtomicU64,
    decays: AtomicU64,
    saturated_hits: AtomicU64,
    producer_errors: AtomicU64,
    /// Misses that found the key already admitted by another thread.
    lost_races: AtomicU64,
    clears: AtomicU64,
    resizes: AtomicU64,
}

impl ConcurrentBoundedMetrics {
    #[inline]
    pub fn inc_hit(&self) {
        self.get_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_miss(&self) {
        self.get_misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_admission(&self) {
        self.admissions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_replacement(&self) {
        self.replacements.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_decay(&self) {
        self.decays.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_saturated_hit(&self) {
        self.saturated_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_producer_error(&self) {
        self.producer_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_lost_race(&self) {
        self.lost_races.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_resize(&self) {
        self.resizes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        for counter in [
            &self.get_hits,
            &self.get_misses,
            &self.admissions,
            &self.replacements,
            &self.decays,
            &self.saturated_hits,
            &self.producer_errors,
            &self.lost_races,
            &self.clears,
            &self.resizes,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> BoundedMetricsSnapshot {
        let get_hits = self.get_hits.load(Ordering::Relaxed);
        let get_misses = self.get_misses.load(Ordering::Relaxed);
        BoundedMetricsSnapshot {
            get_calls: get_hits + get_misses,
            get_hits,
            get_misses,
            admissions: self.admissions.load(Ordering::Relaxed),
            replacements: self.replacements.load(Ordering::Relaxed),
            decays: self.decays.load(Ordering::Relaxed),
            saturated_hits: self.saturated_hits.load(Ordering::Relaxed),
            producer_errors: self.producer_errors.load(Ordering::Relaxed),
            lost_races: self.lost_races.load(Ordering::Relaxed),
            peek_calls: 0,
            peek_found: 0,
            clears: self.clears.load(Ordering::Relaxed),
            resizes: self.resizes.load(Ordering::Relaxed),
            cache_len,
            capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_metrics_hits_and_misses_feed_get_calls() {
        let mut m = BoundedMetrics::default();
        m.record_get_hit();
        m.record_get_miss();
        m.record_get_miss();
        m.record_decay();
        m.record_admission();

        let snap = m.snapshot(1, 4);
        assert_eq!(snap.get_calls, 3);
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 2);
        assert_eq!(snap.decays, 1);
        assert_eq!(snap.admissions, 1);
        assert_eq!(snap.cache_len, 1);
        assert_eq!(snap.capacity, 4);
    }

    #[test]
    fn read_recorder_uses_interior_mutability() {
        let m = BoundedMetrics::default();
        m.record_peek_call();
        m.record_peek_call();
        m.record_peek_found();
        let snap = m.snapshot(0, 1);
        assert_eq!(snap.peek_calls, 2);
        assert_eq!(snap.peek_found, 1);
    }

    #[test]
    fn concurrent_metrics_reset_zeroes_everything() {
        let m = ConcurrentBoundedMetrics::default();
        m.inc_hit();
        m.inc_miss();
        m.inc_lost_race();
        m.inc_resize();
        assert_eq!(m.snapshot(0, 1).get_calls, 2);
        assert_eq!(m.snapshot(0, 1).lost_races, 1);

        m.reset();
        let snap = m.snapshot(0, 1);
        assert_eq!(
            snap,
            BoundedMetricsSnapshot {
                capacity: 1,
                ..Default::default()
            }
        );
    }
}
