//! Shared test utilities for postbox.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`probe`] - Run a blocking call on its own thread and observe whether it returns
//! - [`tracking`] - Allocation tracking for allocation-free paths
//! - [`logging`] - Route `tracing` output to the test harness
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! postbox-test-helpers = { workspace = true }
//! ```
//!
//! ```rust,ignore
//! use postbox_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod must;
pub mod prelude;
pub mod probe;

#[cfg(feature = "tracking")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracking")))]
pub mod tracking;

#[cfg(all(test, feature = "tracking"))]
#[global_allocator]
static GLOBAL_TEST: tracking::TrackingAllocator = tracking::TrackingAllocator;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

pub use must::*;
pub use probe::{BlockingProbe, ProbeError, wait_until};

#[cfg(feature = "tracking")]
pub use tracking::track;
