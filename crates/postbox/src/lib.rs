//! # postbox
//!
//! Bounded, blocking, thread-safe mailboxes for multi-threaded message passing.
//!
//! A [`Mailbox`] is a fixed-capacity FIFO shared by any number of producer and
//! consumer threads. [`Mailbox::post`] blocks while the mailbox is full and
//! [`Mailbox::fetch`] blocks while it is empty. Messages are moved through the
//! mailbox and never inspected or cloned.
//!
//! ## Guarantees
//!
//! - **FIFO**: messages are fetched in the order they were posted
//! - **Bounded**: at most `capacity` messages are stored at any time
//! - **No busy-waiting**: blocked threads park on a condition variable
//! - **No lost wake-ups**: every waiter re-validates its condition under the lock
//! - **No allocation** in `post` or `fetch` once the mailbox exists
//!
//! No fairness is promised between threads racing for the same slot or message.
//!
//! ## Architecture
//!
//! - [`mailbox`] - The [`Mailbox`] type and its post/fetch protocol
//! - [`config`] - [`MailboxConfig`], its builder and the [`WakePolicy`]
//! - [`stats`] - Traffic counters exposed through [`Mailbox::stats`]
//! - [`error`] - Construction errors
//!
//! Storage is provided by the `postbox-ring` crate.
//!
//! ## Example
//!
//! ```rust
//! use postbox::prelude::*;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let config = MailboxConfig::builder().name("jobs").capacity(8).build()?;
//! let mailbox = Arc::new(Mailbox::from_config(config)?);
//!
//! let producers: Vec<_> = (0..4)
//!     .map(|id| {
//!         let mailbox = Arc::clone(&mailbox);
//!         thread::spawn(move || mailbox.post(id))
//!     })
//!     .collect();
//!
//! let mut received: Vec<i32> = (0..4).map(|_| mailbox.fetch()).collect();
//! received.sort_unstable();
//! assert_eq!(received, vec![0, 1, 2, 3]);
//!
//! for producer in producers {
//!     assert!(producer.join().is_ok());
//! }
//! assert_eq!(Mailbox::destroy_shared(Some(mailbox)), Some(Vec::new()));
//! # Ok::<(), MailboxError>(())
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

pub mod config;
pub mod error;
pub mod mailbox;
pub mod stats;

pub mod prelude;

pub use config::{DEFAULT_CAPACITY, MailboxConfig, MailboxConfigBuilder, WakePolicy};
pub use error::{MailboxError, MailboxResult};
pub use mailbox::Mailbox;
pub use stats::{MailboxCounters, MailboxStats};
