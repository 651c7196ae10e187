//! `post` and `fetch` must not allocate once the mailbox exists.

use postbox::Mailbox;
use postbox_test_helpers::assert_no_alloc;
use postbox_test_helpers::prelude::*;
use postbox_test_helpers::tracking::TrackingAllocator;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

#[test]
fn test_post_and_fetch_do_not_allocate() -> TestResult {
    let mailbox = Mailbox::create(8)?;
    mailbox.post(0u64);
    assert_eq!(mailbox.fetch(), 0);

    let guard = track();
    for round in 0..100u64 {
        for n in 0..8 {
            mailbox.post(round * 8 + n);
        }
        for n in 0..8 {
            assert_eq!(mailbox.fetch(), round * 8 + n);
        }
    }
    assert_no_alloc!(guard, "post/fetch");
    Ok(())
}

#[test]
fn test_boxed_payloads_are_moved_without_allocating() -> TestResult {
    let mailbox = Mailbox::create(4)?;
    let payloads: Vec<Box<[u8; 32]>> = (0..4u8).map(|n| Box::new([n; 32])).collect();

    let guard = track();
    for payload in payloads {
        mailbox.post(payload);
    }
    for n in 0..4u8 {
        assert_eq!(mailbox.fetch()[0], n);
    }
    assert_no_alloc!(guard, "boxed payload transport");
    Ok(())
}
