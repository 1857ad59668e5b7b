#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BoundedMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub admissions: u64,   // misses stored into an empty slot
    pub replacements: u64, // misses that overwrote a decayed resident
    pub decays: u64,       // misses that only aged the resident
    pub saturated_hits: u64,
    pub producer_errors: u64,
    pub lost_races: u64, // concurrent misses that found the key already admitted

    pub peek_calls: u64,
    pub peek_found: u64,

    pub clears: u64,
    pub resizes: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl BoundedMetricsSnapshot {
    /// Fraction of `get` calls served from the cache, or 0.0 with no calls.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }

    /// Fraction of misses whose value was stored.
    pub fn retention_ratio(&self) -> f64 {
        if self.get_misses == 0 {
            0.0
        } else {
            (self.admissions + self.replacements) as f64 / self.get_misses as f64
        }
    }
}
