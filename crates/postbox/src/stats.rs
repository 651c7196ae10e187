//! Mailbox traffic counters.
//!
//! Counters use `Ordering::Relaxed`: they are diagnostics, never used to make
//! synchronization decisions. All increments happen while the mailbox lock is
//! held, so a snapshot taken under the same lock would be exact; snapshots taken
//! from [`Mailbox::stats`](crate::Mailbox::stats) are eventually consistent.

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of a mailbox's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MailboxStats {
    /// Messages successfully enqueued.
    pub posted: u64,
    /// Messages successfully dequeued.
    pub fetched: u64,
    /// Times a producer parked on a full mailbox.
    pub post_waits: u64,
    /// Times a consumer parked on an empty mailbox.
    pub fetch_waits: u64,
    /// Wake-ups after which the waiter found its condition still unmet and parked again.
    pub stale_wakeups: u64,
}

impl MailboxStats {
    /// Messages posted but not yet fetched, as seen by this snapshot.
    #[must_use]
    pub fn in_flight(&self) -> u64 {
        self.posted.saturating_sub(self.fetched)
    }
}

/// Atomic counters backing [`MailboxStats`].
#[derive(Debug, Default)]
pub struct MailboxCounters {
    posted: AtomicU64,
    fetched: AtomicU64,
    post_waits: AtomicU64,
    fetch_waits: AtomicU64,
    stale_wakeups: AtomicU64,
}

impl MailboxCounters {
    /// Create counters initialized to zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            posted: AtomicU64::new(0),
            fetched: AtomicU64::new(0),
            post_waits: AtomicU64::new(0),
            fetch_waits: AtomicU64::new(0),
            stale_wakeups: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn inc_posted(&self) {
        self.posted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_fetched(&self) {
        self.fetched.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_post_wait(&self) {
        self.post_waits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_fetch_wait(&self) {
        self.fetch_waits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_stale_wakeup(&self) {
        self.stale_wakeups.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters.
    #[must_use]
    pub fn snapshot(&self) -> MailboxStats {
        MailboxStats {
            posted: self.posted.load(Ordering::Relaxed),
            fetched: self.fetched.load(Ordering::Relaxed),
            post_waits: self.post_waits.load(Ordering::Relaxed),
            fetch_waits: self.fetch_waits.load(Ordering::Relaxed),
            stale_wakeups: self.stale_wakeups.load(Ordering::Relaxed),
        }
    }
}
