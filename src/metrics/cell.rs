use std::cell::Cell;

/// Counter bumped from `&self` methods such as `peek`.
///
/// Plain `Cell`, so a cache holding one is `Send` but not `Sync`; the
/// concurrent cache uses atomics instead.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get().saturating_add(1));
    }
}
