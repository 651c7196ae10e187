//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use postbox_test_helpers::prelude::*;
//! ```

pub use crate::must::{must, must_some, must_with};
pub use crate::probe::{BlockingProbe, ProbeError, wait_until};

#[cfg(feature = "tracking")]
pub use crate::tracking::{AllocationGuard, track};

#[cfg(feature = "logging")]
pub use crate::logging::init_test_tracing;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
