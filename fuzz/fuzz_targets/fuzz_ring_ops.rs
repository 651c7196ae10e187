//! Fuzzes the ring buffer against a `VecDeque` model.
//!
//! The first byte picks the capacity; every following byte is one operation:
//! even bytes insert, odd bytes remove.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_ring_ops
#![no_main]
use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use postbox_ring::RingBuffer;

fuzz_target!(|data: &[u8]| {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 64) + 1;
    let Ok(mut ring) = RingBuffer::try_with_capacity(capacity) else {
        return;
    };
    let mut model = VecDeque::with_capacity(capacity);

    for &op in ops {
        if op % 2 == 0 {
            let accepted = ring.insert(op).is_ok();
            assert_eq!(accepted, model.len() < capacity);
            if accepted {
                model.push_back(op);
            }
        } else {
            assert_eq!(ring.remove(), model.pop_front());
        }
        assert_eq!(ring.len(), model.len());
        assert_eq!(ring.head(), model.front());
        assert!(ring.len() <= ring.capacity());
    }

    assert!(ring.iter().eq(model.iter()));
});
