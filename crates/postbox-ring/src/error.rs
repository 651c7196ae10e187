//! Error types for ring buffer construction.
//!
//! Only construction can fail. Once a [`RingBuffer`](crate::RingBuffer) exists,
//! a full ring is reported by handing the rejected item back and an empty ring
//! by returning `None`.

use thiserror::Error;

/// Errors that can occur while creating a ring buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// A ring must hold at least one element.
    #[error("ring buffer capacity must be greater than 0")]
    ZeroCapacity,

    /// The backing storage could not be allocated.
    #[error("failed to allocate ring buffer storage for {capacity} slots")]
    AllocationFailed {
        /// The capacity that was requested.
        capacity: usize,
    },
}

impl RingError {
    /// Create an allocation failure error.
    #[must_use]
    pub fn allocation_failed(capacity: usize) -> Self {
        Self::AllocationFailed { capacity }
    }
}

/// A specialized `Result` type for ring buffer construction.
pub type RingResult<T> = std::result::Result<T, RingError>;
