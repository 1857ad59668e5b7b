//! Fixed-length table of single-resident slots with retention counters.
//!
//! Each [`Slot`] holds at most one key/value pair and a `u64` retention
//! counter. The slot owns its own state transitions so that every cache
//! front-end (single-threaded or locked) applies exactly the same rules:
//!
//! ```text
//!   Empty ─────────── miss ──────────────▶ Occupied(1)
//!   Occupied(C) ───── hit ───────────────▶ Occupied(C+1)        (saturating)
//!   Occupied(C>0) ─── miss, other key ───▶ Occupied(C-1)        (value kept)
//!   Occupied(0) ───── miss, other key ───▶ Occupied(1, new key)
//! ```
//!
//! `Occupied(0)` is only reachable through decay; a table built by
//! [`SlotTable::new`] is all `Empty`.

/// Result of applying a miss to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissOutcome {
    /// The slot was empty and now holds the new key with counter 1.
    Admitted,
    /// A decayed resident (counter 0) was overwritten by the new key.
    Replaced,
    /// The resident kept the slot; its counter dropped to `remaining`.
    Decayed { remaining: u64 },
}

impl MissOutcome {
    /// Returns `true` if the produced value was stored.
    #[inline]
    pub fn retained(self) -> bool {
        !matches!(self, MissOutcome::Decayed { .. })
    }
}

/// One bucket of a direct-mapped table.
#[derive(Debug, Clone)]
pub struct Slot<K, V> {
    entry: Option<(K, V)>,
    counter: u64,
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K, V> Slot<K, V> {
    /// An empty slot with counter 0.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            entry: None,
            counter: 0,
        }
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.entry.is_some()
    }

    #[inline]
    pub fn counter(&self) -> u64 {
        self.counter
    }

    #[inline]
    pub fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(|(k, _)| k)
    }

    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, v)| v)
    }

    /// Returns the resident value if the slot holds `key`.
    #[inline]
    pub fn lookup(&self, key: &K) -> Option<&V>
    where
        K: Eq,
    {
        match &self.entry {
            Some((k, v)) if k == key => Some(v),
            _ => None,
        }
    }

    /// Returns `true` if the slot holds `key`.
    #[inline]
    pub fn holds(&self, key: &K) -> bool
    where
        K: Eq,
    {
        self.lookup(key).is_some()
    }

    /// Records a hit on the resident and returns its value.
    ///
    /// The counter grows by one and saturates at `max_retention`. Callers must
    /// have checked [`holds`](Self::holds) first; on an empty slot this is a
    /// no-op returning `None`.
    #[inline]
    pub fn on_hit(&mut self, max_retention: u64) -> Option<&V> {
        let (_, value) = self.entry.as_ref()?;
        if self.counter < max_retention {
            self.counter += 1;
        }
        Some(value)
    }

    /// Applies a miss for `key` whose freshly produced value is `value`.
    ///
    /// With counter 0 the slot stores `(key, value.clone())` with counter 1.
    /// Otherwise the resident is aged by one and nothing is cloned.
    pub fn on_miss(&mut self, key: K, value: &V) -> MissOutcome
    where
        V: Clone,
    {
        if self.counter == 0 {
            let outcome = if self.entry.is_some() {
                MissOutcome::Replaced
            } else {
                MissOutcome::Admitted
            };
            self.entry = Some((key, value.clone()));
            self.counter = 1;
            outcome
        } else {
            self.counter -= 1;
            MissOutcome::Decayed {
                remaining: self.counter,
            }
        }
    }

    /// Returns `true` if a miss applied now would store its value.
    #[inline]
    pub fn would_admit(&self) -> bool {
        self.counter == 0
    }
}

/// Boxed slice of slots whose length never changes after construction.
#[derive(Debug, Clone)]
pub struct SlotTable<K, V> {
    slots: Box<[Slot<K, V>]>,
}

impl<K, V> SlotTable<K, V> {
    /// Creates a table of `len` empty slots.
    pub fn new(len: usize) -> Self {
        let slots = (0..len).map(|_| Slot::empty()).collect();
        Self { slots }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the slot at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len()`. Bucket indices produced by a selector with
    /// the same length are always in range.
    #[inline]
    pub fn slot(&self, idx: usize) -> &Slot<K, V> {
        &self.slots[idx]
    }

    /// Mutable counterpart of [`slot`](Self::slot).
    #[inline]
    pub fn slot_mut(&mut self, idx: usize) -> &mut Slot<K, V> {
        &mut self.slots[idx]
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Slot<K, V>> {
        self.slots.get(idx)
    }

    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Slot<K, V>> {
        self.slots.get_mut(idx)
    }

    /// Number of occupied slots. O(len).
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot<K, V>> {
        self.slots.iter()
    }

    /// Empties every slot in place.
    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::empty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_all_empty() {
        let table: SlotTable<u32, u32> = SlotTable::new(4);
        assert_eq!(table.len(), 4);
        assert_eq!(table.occupied(), 0);
        assert!(table.iter().all(|s| !s.is_occupied() && s.counter() == 0));
    }

    #[test]
    fn first_miss_admits_with_counter_one() {
        let mut slot = Slot::empty();
        assert_eq!(slot.on_miss("a", &1), MissOutcome::Admitted);
        assert_eq!(slot.key(), Some(&"a"));
        assert_eq!(slot.value(), Some(&1));
        assert_eq!(slot.counter(), 1);
    }

    #[test]
    fn hit_increments_counter() {
        let mut slot = Slot::empty();
        slot.on_miss("a", &1);
        assert_eq!(slot.on_hit(u64::MAX), Some(&1));
        assert_eq!(slot.on_hit(u64::MAX), Some(&1));
        assert_eq!(slot.counter(), 3);
    }

    #[test]
    fn hit_saturates_at_max_retention() {
        let mut slot = Slot::empty();
        slot.on_miss("a", &1);
        for _ in 0..10 {
            slot.on_hit(3);
        }
        assert_eq!(slot.counter(), 3);
    }

    #[test]
    fn hit_on_empty_slot_is_noop() {
        let mut slot: Slot<&str, i32> = Slot::empty();
        assert_eq!(slot.on_hit(u64::MAX), None);
        assert_eq!(slot.counter(), 0);
    }

    #[test]
    fn colliding_miss_decays_then_replaces() {
        let mut slot = Slot::empty();
        slot.on_miss("a", &1);
        slot.on_hit(u64::MAX); // counter 2

        assert_eq!(slot.on_miss("b", &2), MissOutcome::Decayed { remaining: 1 });
        assert_eq!(slot.key(), Some(&"a"));
        assert_eq!(slot.on_miss("b", &2), MissOutcome::Decayed { remaining: 0 });
        assert_eq!(slot.key(), Some(&"a"));
        assert!(slot.would_admit());
        assert_eq!(slot.on_miss("b", &2), MissOutcome::Replaced);
        assert_eq!(slot.key(), Some(&"b"));
        assert_eq!(slot.counter(), 1);
    }

    #[test]
    fn lookup_requires_key_equality() {
        let mut slot = Slot::empty();
        slot.on_miss(10_u64, &"ten");
        assert_eq!(slot.lookup(&10), Some(&"ten"));
        assert_eq!(slot.lookup(&11), None);
        assert!(slot.holds(&10));
        assert!(!slot.holds(&11));
    }

    #[test]
    fn outcome_retained_flag() {
        assert!(MissOutcome::Admitted.retained());
        assert!(MissOutcome::Replaced.retained());
        assert!(!MissOutcome::Decayed { remaining: 0 }.retained());
    }

    #[test]
    fn reset_empties_every_slot() {
        let mut table = SlotTable::new(3);
        for idx in 0..3 {
            table.get_mut(idx).unwrap().on_miss(idx, &(idx * 10));
        }
        assert_eq!(table.occupied(), 3);
        table.reset();
        assert_eq!(table.len(), 3);
        assert_eq!(table.occupied(), 0);
        assert!(table.iter().all(|s| s.counter() == 0));
    }
}
