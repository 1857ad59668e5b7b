#![no_main]

use libfuzzer_sys::fuzz_target;
use memokit::policy::bounded::BoundedCache;
use memokit::traits::ReadOnlyCache;

// Fuzz arbitrary BoundedCache operation sequences
//
// Every byte pair is decoded into an operation; after each one the slot
// table must stay well-formed and every returned value must belong to the
// requested key.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let capacity = (data[0] as usize % 16) + 1;
    let mut cache: BoundedCache<u8, u16> = BoundedCache::new(capacity);

    for pair in data[1..].chunks(2) {
        let op = pair[0];
        let key = pair.get(1).copied().unwrap_or(0);
        let expected = u16::from(key) * 3;

        match op % 8 {
            0..=3 => {
                let before = cache.retention(&key);
                let mut produced = false;
                let v = cache.get_or_insert_with(key, || {
                    produced = true;
                    expected
                });
                assert_eq!(v, expected);
                assert_eq!(produced, before.is_none());
                if let Some(c) = before {
                    assert_eq!(cache.retention(&key), Some(c.saturating_add(1)));
                }
            },
            4 => {
                let idx = cache.bucket_of(&key);
                let before = cache.slot_counter(idx);
                let held = cache.contains(&key);
                let r: Result<u16, ()> = cache.try_get_or_insert_with(key, || Err(()));
                assert_eq!(r.is_ok(), held);
                if !held {
                    assert_eq!(cache.slot_counter(idx), before);
                }
            },
            5 => {
                let _ = cache.peek(&key);
            },
            6 => {
                cache.clear();
                assert!(cache.is_empty());
            },
            _ => {
                let new_capacity = usize::from(key % 16);
                let old_capacity = cache.capacity();
                let result = cache.resize(new_capacity);
                if new_capacity == 0 {
                    assert!(result.is_err());
                    assert_eq!(cache.capacity(), old_capacity);
                } else {
                    assert!(result.is_ok());
                    assert_eq!(cache.capacity(), new_capacity);
                }
            },
        }

        assert!(cache.len() <= cache.capacity());
        assert!(cache.check_invariants().is_ok());
    }
});
