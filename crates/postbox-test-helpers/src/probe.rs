//! Observing calls that are expected to block.
//!
//! A [`BlockingProbe`] runs a closure on a dedicated, named thread. Tests use it to
//! assert that a call is still parked after some time, and later that it returns
//! once the condition it waits for is satisfied.
//!
//! Blocking can only be observed, never proven: "still running after the window"
//! is the strongest statement a probe makes. Keep windows short and
//! assertions one-sided.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Errors reported by [`BlockingProbe::join_within`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The probed call did not return in time. Its thread is detached.
    #[error("{label} did not finish within {timeout:?}")]
    TimedOut {
        /// Probe label.
        label: String,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The probed call panicked.
    #[error("{label} panicked")]
    Panicked {
        /// Probe label.
        label: String,
    },

    /// The probe thread could not be spawned.
    #[error("failed to spawn probe thread {label}: {reason}")]
    Spawn {
        /// Probe label.
        label: String,
        /// OS error text.
        reason: String,
    },
}

/// A closure running on its own thread, observed from the test thread.
///
/// # Example
///
/// ```rust
/// use postbox_test_helpers::BlockingProbe;
/// use std::sync::mpsc;
/// use std::time::Duration;
///
/// let (tx, rx) = mpsc::channel();
/// let probe = BlockingProbe::spawn("receiver", move || rx.recv().ok())?;
///
/// assert!(probe.stays_blocked(Duration::from_millis(20)));
/// assert!(tx.send(5).is_ok());
/// assert_eq!(probe.join_within(Duration::from_secs(5))?, Some(5));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct BlockingProbe<R> {
    label: String,
    handle: JoinHandle<R>,
}

impl<R: Send + 'static> BlockingProbe<R> {
    /// Run `f` on a new thread named after `label`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Spawn`] if the thread cannot be created.
    pub fn spawn<F>(label: impl Into<String>, f: F) -> Result<Self, ProbeError>
    where
        F: FnOnce() -> R + Send + 'static,
    {
        let label = label.into();
        let handle = thread::Builder::new()
            .name(label.clone())
            .spawn(f)
            .map_err(|e| ProbeError::Spawn {
                label: label.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { label, handle })
    }

    /// Probe label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` once the closure has returned or panicked.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Returns `true` if the closure is still running after `window`.
    #[must_use]
    pub fn stays_blocked(&self, window: Duration) -> bool {
        !wait_until(window, || self.is_finished())
    }

    /// Wait up to `timeout` for the closure to return and collect its result.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::TimedOut`] if the closure is still running after
    /// `timeout`, and [`ProbeError::Panicked`] if it panicked.
    pub fn join_within(self, timeout: Duration) -> Result<R, ProbeError> {
        if !wait_until(timeout, || self.handle.is_finished()) {
            return Err(ProbeError::TimedOut {
                label: self.label,
                timeout,
            });
        }
        let label = self.label;
        self.handle
            .join()
            .map_err(|_| ProbeError::Panicked { label })
    }
}

/// Poll `condition` until it holds or `timeout` elapses.
///
/// Returns whether the condition was observed to hold.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(POLL_INTERVAL);
    }
}
