//! Error types for mailbox construction.
//!
//! Once a mailbox exists, `post` and `fetch` have no error path: a full or empty
//! mailbox is back-pressure and surfaces only as a call that has not returned yet.

use postbox_ring::RingError;
use thiserror::Error;

/// Errors that can occur while creating a mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailboxError {
    /// The message storage could not be allocated.
    #[error("failed to allocate mailbox storage for {capacity} messages")]
    AllocationFailure {
        /// The capacity that was requested.
        capacity: usize,
    },

    /// The requested capacity cannot hold any message.
    #[error("invalid mailbox capacity {0}: must be greater than 0")]
    InvalidCapacity(usize),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl MailboxError {
    /// Create an allocation failure error.
    #[must_use]
    pub fn allocation_failure(capacity: usize) -> Self {
        Self::AllocationFailure { capacity }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

impl From<RingError> for MailboxError {
    fn from(err: RingError) -> Self {
        match err {
            RingError::ZeroCapacity => Self::InvalidCapacity(0),
            RingError::AllocationFailed { capacity } => Self::AllocationFailure { capacity },
        }
    }
}

/// A specialized `Result` type for mailbox operations.
pub type MailboxResult<T> = std::result::Result<T, MailboxError>;
