//! Bounded blocking mailbox.
//!
//! This module provides [`Mailbox`], a fixed-capacity FIFO shared by any number of
//! producer and consumer threads. A single mutex guards the ring buffer; two
//! condition variables park producers on a full mailbox and consumers on an empty
//! one.
//!
//! # Wait discipline
//!
//! A wake-up is only a hint. Every waiter re-checks its condition under the lock
//! after waking and parks again if the condition still fails. Spurious wake-ups,
//! broadcasts and races between several producers (or consumers) for one slot
//! (or message) are all absorbed by that loop.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex, MutexGuard};
use postbox_ring::RingBuffer;

use crate::config::{DEFAULT_NAME, MailboxConfig, WakePolicy};
use crate::error::{MailboxError, MailboxResult};
use crate::stats::{MailboxCounters, MailboxStats};

/// Bounded, blocking, multi-producer multi-consumer FIFO.
///
/// Share it between threads with `Arc<Mailbox<T>>`.
///
/// # Example
///
/// ```rust
/// use postbox::Mailbox;
/// use std::sync::Arc;
/// use std::thread;
///
/// let mailbox = Arc::new(Mailbox::create(1)?);
///
/// let producer = {
///     let mailbox = Arc::clone(&mailbox);
///     thread::spawn(move || {
///         mailbox.post("A");
///         mailbox.post("B"); // blocks until "A" is fetched
///     })
/// };
///
/// assert_eq!(mailbox.fetch(), "A");
/// assert_eq!(mailbox.fetch(), "B");
/// assert!(producer.join().is_ok());
/// # Ok::<(), postbox::MailboxError>(())
/// ```
pub struct Mailbox<T> {
    name: String,
    wake_policy: WakePolicy,
    storage: Mutex<RingBuffer<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    counters: MailboxCounters,
}

impl<T> Mailbox<T> {
    /// Create a mailbox holding up to `capacity` messages, with default settings
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`MailboxError::InvalidCapacity`] if `capacity` is 0 and
    /// [`MailboxError::AllocationFailure`] if the storage cannot be allocated.
    /// Nothing is left to clean up on failure.
    pub fn create(capacity: usize) -> MailboxResult<Self> {
        Self::build(DEFAULT_NAME.to_string(), capacity, WakePolicy::default())
    }

    /// Create a mailbox from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the storage cannot be
    /// allocated.
    pub fn from_config(config: MailboxConfig) -> MailboxResult<Self> {
        config.validate()?;
        Self::build(config.name, config.capacity, config.wake_policy)
    }

    fn build(name: String, capacity: usize, wake_policy: WakePolicy) -> MailboxResult<Self> {
        let ring = RingBuffer::try_with_capacity(capacity)?;

        tracing::debug!(
            mailbox = %name,
            capacity,
            wake_policy = ?wake_policy,
            "Mailbox created"
        );

        Ok(Self {
            name,
            wake_policy,
            storage: Mutex::new(ring),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            counters: MailboxCounters::new(),
        })
    }

    /// Destroy the mailbox, returning every message that was never fetched.
    ///
    /// Taking `self` by value guarantees no thread is still inside `post` or
    /// `fetch`, and that the mailbox cannot be used afterwards.
    #[must_use = "undelivered messages are returned to the caller"]
    pub fn destroy(self) -> Vec<T> {
        let undelivered: Vec<T> = self.storage.into_inner().drain().collect();

        if undelivered.is_empty() {
            tracing::debug!(mailbox = %self.name, "Mailbox destroyed");
        } else {
            tracing::warn!(
                mailbox = %self.name,
                undelivered = undelivered.len(),
                "Mailbox destroyed with undelivered messages"
            );
        }

        undelivered
    }

    /// Destroy a shared mailbox if `handle` is its last reference.
    ///
    /// Returns `None` without doing anything when `handle` is `None` or when other
    /// handles are still alive; in the latter case the mailbox is destroyed when
    /// the last of them is dropped.
    #[must_use = "undelivered messages are returned to the caller"]
    pub fn destroy_shared(handle: Option<Arc<Self>>) -> Option<Vec<T>> {
        Arc::into_inner(handle?).map(Self::destroy)
    }

    /// Enqueue `message`, blocking while the mailbox is full.
    ///
    /// Returns once the message is stored. There is no timeout: a producer on a
    /// mailbox that is never drained blocks forever.
    pub fn post(&self, message: T) {
        let mut storage = self.storage.lock();
        let mut pending = message;
        let mut woken = false;

        loop {
            match storage.insert(pending) {
                Ok(()) => break,
                Err(rejected) => {
                    pending = rejected;
                    if woken {
                        self.counters.inc_stale_wakeup();
                        tracing::trace!(mailbox = %self.name, "Producer woke to a full mailbox");
                    }
                    self.counters.inc_post_wait();
                    tracing::trace!(mailbox = %self.name, "Producer waiting for free slot");
                    self.not_full.wait(&mut storage);
                    woken = true;
                }
            }
        }

        self.counters.inc_posted();
        self.wake(&self.not_empty);
    }

    /// Dequeue the oldest message, blocking while the mailbox is empty.
    ///
    /// There is no timeout: a consumer on a mailbox that is never fed blocks
    /// forever.
    pub fn fetch(&self) -> T {
        let mut storage = self.storage.lock();
        let mut woken = false;

        let message = loop {
            if let Some(message) = storage.remove() {
                break message;
            }
            if woken {
                self.counters.inc_stale_wakeup();
                tracing::trace!(mailbox = %self.name, "Consumer woke to an empty mailbox");
            }
            self.counters.inc_fetch_wait();
            tracing::trace!(mailbox = %self.name, "Consumer waiting for message");
            self.not_empty.wait(&mut storage);
            woken = true;
        };

        self.counters.inc_fetched();
        self.wake(&self.not_full);
        message
    }

    /// Wake every blocked producer and consumer without changing the contents.
    ///
    /// Each woken thread re-validates its condition and parks again if it still
    /// cannot proceed. Returns the number of threads woken.
    pub fn wake_all_waiters(&self) -> usize {
        let _storage = self.storage.lock();
        self.not_empty.notify_all() + self.not_full.notify_all()
    }

    // Called with the storage lock held.
    fn wake(&self, condition: &Condvar) {
        match self.wake_policy {
            WakePolicy::One => {
                condition.notify_one();
            }
            WakePolicy::All => {
                condition.notify_all();
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, RingBuffer<T>> {
        self.storage.lock()
    }

    /// Number of messages currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no message is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns `true` if a `post` would block right now.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.lock().is_full()
    }

    /// Maximum number of queued messages.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Label used in tracing events.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Waiter wake-up policy.
    #[must_use]
    pub fn wake_policy(&self) -> WakePolicy {
        self.wake_policy
    }

    /// Snapshot of the traffic counters.
    #[must_use]
    pub fn stats(&self) -> MailboxStats {
        self.counters.snapshot()
    }
}

impl<T> fmt::Debug for Mailbox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Mailbox");
        debug
            .field("name", &self.name)
            .field("wake_policy", &self.wake_policy);
        match self.storage.try_lock() {
            Some(storage) => debug
                .field("len", &storage.len())
                .field("capacity", &storage.capacity()),
            None => debug.field("storage", &"<locked>"),
        };
        debug.finish()
    }
}
