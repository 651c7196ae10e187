//! Prelude for postbox-ring.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use postbox_ring::prelude::*;
//!
//! let mut ring: RingBuffer<u32> = RingBuffer::try_with_capacity(4)?;
//! assert!(ring.insert(7).is_ok());
//! # Ok::<(), RingError>(())
//! ```

pub use crate::error::{RingError, RingResult};
pub use crate::ring::{Drain, RingBuffer};
