//! # postbox-ring
//!
//! Fixed-capacity circular buffer used as the storage layer of a `postbox` mailbox.
//!
//! The ring owns a single allocation made at construction time. After that, every
//! operation is O(1) and allocation-free: inserting at the tail, peeking at the
//! head and removing the head only move indices around.
//!
//! ## Concurrency
//!
//! [`RingBuffer`] performs **no synchronization of its own**. It takes `&mut self`
//! for every mutation, so sharing it between threads requires the caller to wrap
//! it in a lock. The `postbox` crate does exactly that.
//!
//! ## Architecture
//!
//! - [`ring`] - The [`RingBuffer`] type and its draining iterator
//! - [`error`] - Construction errors
//!
//! ## Usage
//!
//! ```rust
//! use postbox_ring::RingBuffer;
//!
//! let mut ring = RingBuffer::try_with_capacity(2)?;
//!
//! assert!(ring.insert("a").is_ok());
//! assert!(ring.insert("b").is_ok());
//! assert!(ring.is_full());
//!
//! // A full ring hands the item back instead of overwriting.
//! assert_eq!(ring.insert("c"), Err("c"));
//!
//! assert_eq!(ring.head(), Some(&"a"));
//! assert_eq!(ring.remove(), Some("a"));
//! assert_eq!(ring.remove(), Some("b"));
//! assert!(ring.is_empty());
//! # Ok::<(), postbox_ring::RingError>(())
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod ring;

pub mod prelude;

pub use error::{RingError, RingResult};
pub use ring::{Drain, RingBuffer};
