//! Prelude for postbox.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use postbox::prelude::*;
//!
//! let mailbox = Mailbox::create(DEFAULT_CAPACITY)?;
//! mailbox.post("hello");
//! assert_eq!(mailbox.fetch(), "hello");
//! # Ok::<(), MailboxError>(())
//! ```

pub use crate::config::{DEFAULT_CAPACITY, MailboxConfig, MailboxConfigBuilder, WakePolicy};
pub use crate::error::{MailboxError, MailboxResult};
pub use crate::mailbox::Mailbox;
pub use crate::stats::MailboxStats;
