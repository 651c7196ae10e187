//! Concurrency tests for postbox.
//!
//! Blocking is observed with `BlockingProbe`: a call counts as blocked if it is
//! still running after a short window and the mailbox counters show it parked.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use postbox::prelude::*;
use postbox_test_helpers::prelude::*;

const BLOCK_WINDOW: Duration = Duration::from_millis(50);
const JOIN_TIMEOUT: Duration = Duration::from_secs(10);

fn shared<T>(capacity: usize, policy: WakePolicy) -> Result<Arc<Mailbox<T>>, MailboxError> {
    let config = MailboxConfig::builder()
        .name("test")
        .capacity(capacity)
        .wake_policy(policy)
        .build()?;
    Ok(Arc::new(Mailbox::from_config(config)?))
}

#[test]
fn test_post_blocks_when_full_until_fetch() -> TestResult {
    init_test_tracing();
    let mailbox = shared(3, WakePolicy::One)?;
    for n in 1..=3 {
        mailbox.post(n);
    }

    let producer = {
        let mailbox = Arc::clone(&mailbox);
        BlockingProbe::spawn("producer", move || mailbox.post(4))?
    };

    assert!(producer.stays_blocked(BLOCK_WINDOW));
    assert!(wait_until(JOIN_TIMEOUT, || mailbox.stats().post_waits >= 1));
    assert_eq!(mailbox.len(), 3);

    assert_eq!(mailbox.fetch(), 1);
    producer.join_within(JOIN_TIMEOUT)?;

    assert_eq!(mailbox.len(), 3);
    assert_eq!((mailbox.fetch(), mailbox.fetch(), mailbox.fetch()), (2, 3, 4));
    Ok(())
}

#[test]
fn test_fetch_blocks_when_empty_until_post() -> TestResult {
    init_test_tracing();
    let mailbox = shared::<String>(4, WakePolicy::One)?;

    let consumer = {
        let mailbox = Arc::clone(&mailbox);
        BlockingProbe::spawn("consumer", move || mailbox.fetch())?
    };

    assert!(consumer.stays_blocked(BLOCK_WINDOW));
    assert!(wait_until(JOIN_TIMEOUT, || mailbox.stats().fetch_waits >= 1));

    mailbox.post("hello".to_string());

    assert_eq!(consumer.join_within(JOIN_TIMEOUT)?, "hello");
    assert!(mailbox.is_empty());
    Ok(())
}

#[test]
fn test_capacity_one_handoff_scenario() -> TestResult {
    init_test_tracing();
    let mailbox = shared(1, WakePolicy::One)?;

    mailbox.post("A");
    assert!(mailbox.is_full());

    let producer = {
        let mailbox = Arc::clone(&mailbox);
        BlockingProbe::spawn("producer-b", move || mailbox.post("B"))?
    };
    assert!(producer.stays_blocked(BLOCK_WINDOW));

    assert_eq!(mailbox.fetch(), "A");
    producer.join_within(JOIN_TIMEOUT)?;
    assert_eq!(mailbox.fetch(), "B");
    assert!(mailbox.is_empty());
    Ok(())
}

#[test]
fn test_spurious_wake_does_not_release_fetch() -> TestResult {
    init_test_tracing();
    let mailbox = shared::<u32>(2, WakePolicy::One)?;

    let consumer = {
        let mailbox = Arc::clone(&mailbox);
        BlockingProbe::spawn("consumer", move || mailbox.fetch())?
    };
    assert!(wait_until(JOIN_TIMEOUT, || mailbox.stats().fetch_waits >= 1));

    for _ in 0..5 {
        mailbox.wake_all_waiters();
    }

    assert!(wait_until(JOIN_TIMEOUT, || mailbox.stats().stale_wakeups >= 1));
    assert!(consumer.stays_blocked(BLOCK_WINDOW));
    assert!(mailbox.is_empty());
    assert_eq!(mailbox.stats().fetched, 0);

    mailbox.post(42);
    assert_eq!(consumer.join_within(JOIN_TIMEOUT)?, 42);
    Ok(())
}

#[test]
fn test_spurious_wake_does_not_overfill() -> TestResult {
    init_test_tracing();
    let mailbox = shared(1, WakePolicy::One)?;
    mailbox.post(1u32);

    let producer = {
        let mailbox = Arc::clone(&mailbox);
        BlockingProbe::spawn("producer", move || mailbox.post(2))?
    };
    assert!(wait_until(JOIN_TIMEOUT, || mailbox.stats().post_waits >= 1));

    for _ in 0..5 {
        mailbox.wake_all_waiters();
    }

    assert!(wait_until(JOIN_TIMEOUT, || mailbox.stats().stale_wakeups >= 1));
    assert!(producer.stays_blocked(BLOCK_WINDOW));
    assert_eq!(mailbox.len(), 1);
    assert_eq!(mailbox.stats().posted, 1);

    assert_eq!(mailbox.fetch(), 1);
    producer.join_within(JOIN_TIMEOUT)?;
    assert_eq!(mailbox.fetch(), 2);
    Ok(())
}

#[test]
fn test_broadcast_wakes_losing_consumers_back_to_sleep() -> TestResult {
    init_test_tracing();
    let mailbox = shared::<u32>(4, WakePolicy::All)?;

    let consumers: Vec<_> = (0..3)
        .map(|i| {
            let mailbox = Arc::clone(&mailbox);
            BlockingProbe::spawn(format!("consumer-{i}"), move || mailbox.fetch())
        })
        .collect::<Result<_, _>>()?;
    assert!(wait_until(JOIN_TIMEOUT, || mailbox.stats().fetch_waits >= 3));

    // One message, three woken consumers: two of them must park again.
    mailbox.post(7);
    assert!(wait_until(JOIN_TIMEOUT, || mailbox.stats().stale_wakeups >= 2));
    assert_eq!(mailbox.stats().fetched, 1);

    mailbox.post(8);
    mailbox.post(9);

    let mut received = Vec::new();
    for consumer in consumers {
        received.push(consumer.join_within(JOIN_TIMEOUT)?);
    }
    received.sort_unstable();
    assert_eq!(received, vec![7, 8, 9]);
    Ok(())
}

#[test]
fn test_one_message_per_thread_no_loss_no_duplication() -> TestResult {
    let threads = 16u32;
    let mailbox = shared(2, WakePolicy::One)?;

    let producers: Vec<_> = (0..threads)
        .map(|id| {
            let mailbox = Arc::clone(&mailbox);
            thread::spawn(move || mailbox.post(id))
        })
        .collect();
    let consumers: Vec<_> = (0..threads)
        .map(|_| {
            let mailbox = Arc::clone(&mailbox);
            thread::spawn(move || mailbox.fetch())
        })
        .collect();

    for producer in producers {
        assert!(producer.join().is_ok(), "producer panicked");
    }
    let mut received = Vec::new();
    for consumer in consumers {
        received.push(consumer.join().map_err(|_| "consumer panicked")?);
    }

    received.sort_unstable();
    assert_eq!(received, (0..threads).collect::<Vec<_>>());
    assert!(mailbox.is_empty());
    Ok(())
}

fn run_many_producers_many_consumers(policy: WakePolicy) -> TestResult {
    let producers = 4u32;
    let consumers = 4u32;
    let per_producer = 2_000u32;
    let mailbox = shared::<(u32, u32)>(4, policy)?;

    let producer_handles: Vec<_> = (0..producers)
        .map(|producer| {
            let mailbox = Arc::clone(&mailbox);
            thread::spawn(move || {
                for seq in 0..per_producer {
                    mailbox.post((producer, seq));
                }
            })
        })
        .collect();

    let per_consumer = producers * per_producer / consumers;
    let consumer_handles: Vec<_> = (0..consumers)
        .map(|_| {
            let mailbox = Arc::clone(&mailbox);
            thread::spawn(move || {
                (0..per_consumer)
                    .map(|_| mailbox.fetch())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in producer_handles {
        assert!(handle.join().is_ok(), "producer panicked");
    }

    let mut seen: HashMap<u32, Vec<u32>> = HashMap::new();
    for handle in consumer_handles {
        let batch = handle.join().map_err(|_| "consumer panicked")?;

        // Each consumer observes a subsequence of the global FIFO order, so
        // messages from any one producer arrive in increasing sequence.
        let mut last_seq: HashMap<u32, u32> = HashMap::new();
        for &(producer, seq) in &batch {
            if let Some(&previous) = last_seq.get(&producer) {
                assert!(seq > previous, "producer {producer}: {seq} after {previous}");
            }
            last_seq.insert(producer, seq);
            seen.entry(producer).or_default().push(seq);
        }
    }

    assert_eq!(seen.len(), producers as usize);
    for (producer, mut seqs) in seen {
        seqs.sort_unstable();
        assert_eq!(
            seqs,
            (0..per_producer).collect::<Vec<_>>(),
            "producer {producer} lost or duplicated messages"
        );
    }

    let stats = mailbox.stats();
    assert_eq!(stats.posted, u64::from(producers * per_producer));
    assert_eq!(stats.fetched, stats.posted);
    assert!(mailbox.is_empty());
    Ok(())
}

#[test]
fn test_many_producers_many_consumers_signal_one() -> TestResult {
    run_many_producers_many_consumers(WakePolicy::One)
}

#[test]
fn test_many_producers_many_consumers_broadcast() -> TestResult {
    run_many_producers_many_consumers(WakePolicy::All)
}

#[test]
fn test_len_never_exceeds_capacity_under_load() -> TestResult {
    let capacity = 3;
    let mailbox = shared::<u64>(capacity, WakePolicy::One)?;

    let producers: Vec<_> = (0..4)
        .map(|_| {
            let mailbox = Arc::clone(&mailbox);
            thread::spawn(move || {
                for n in 0..1_000 {
                    mailbox.post(n);
                }
            })
        })
        .collect();

    let observer = {
        let mailbox = Arc::clone(&mailbox);
        thread::spawn(move || {
            let mut max_seen = 0;
            for _ in 0..4_000 {
                max_seen = max_seen.max(mailbox.len());
                assert!(mailbox.fetch() < 1_000);
            }
            max_seen
        })
    };

    for producer in producers {
        assert!(producer.join().is_ok(), "producer panicked");
    }
    let max_seen = observer.join().map_err(|_| "observer panicked")?;

    assert!(max_seen <= capacity);
    assert!(mailbox.is_empty());
    Ok(())
}
