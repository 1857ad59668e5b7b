#![no_main]

use libfuzzer_sys::fuzz_target;
use memokit::ds::BucketSelector;

// Fuzz arbitrary bucket selection operations
//
// Tests determinism and range validity for various bucket counts and keys,
// including after the bucket count changes.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let bucket_count = (data[0] as usize) % 64; // 0 is clamped to 1
    let mut selector = BucketSelector::new(bucket_count);
    assert_eq!(selector.bucket_count(), bucket_count.max(1));

    for &byte in &data[1..] {
        let key = u32::from(byte);
        let bucket = selector.bucket_for_key(&key);
        assert!(bucket < selector.bucket_count());
        assert_eq!(bucket, selector.bucket_for_key(&key));

        // Occasionally change the bucket count
        if byte % 17 == 0 {
            selector.set_bucket_count(usize::from(byte) + 1);
            assert!(selector.bucket_for_key(&key) < selector.bucket_count());
        }
    }

    for chunk in data[1..].chunks(3) {
        let key = format!("key_{:?}", chunk);
        let bucket = selector.bucket_for_key(&key);
        assert!(bucket < selector.bucket_count());
        assert_eq!(bucket, selector.bucket_for_key(key.as_str()));
    }
});
