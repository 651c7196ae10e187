//! Fuzzes single-threaded mailbox traffic.
//!
//! Operations that would block are skipped, so every run terminates. Checks FIFO
//! order, the capacity bound and the counters.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_mailbox_ops
#![no_main]
use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use postbox::Mailbox;

fuzz_target!(|data: &[u8]| {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 16) + 1;
    let Ok(mailbox) = Mailbox::create(capacity) else {
        return;
    };
    let mut model = VecDeque::new();

    for &op in ops {
        if op & 1 == 0 {
            if !mailbox.is_full() {
                mailbox.post(op);
                model.push_back(op);
            }
        } else if !mailbox.is_empty() {
            assert_eq!(Some(mailbox.fetch()), model.pop_front());
        }
        assert_eq!(mailbox.len(), model.len());
        assert!(mailbox.len() <= capacity);
    }

    let stats = mailbox.stats();
    assert_eq!(stats.post_waits + stats.fetch_waits, 0);
    assert_eq!(mailbox.destroy(), Vec::from(model));
});
