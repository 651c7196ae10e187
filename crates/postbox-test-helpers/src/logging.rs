//! Test logging.

use tracing_subscriber::filter::LevelFilter;

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Output is captured per test and shown only for failing tests. Safe to call
/// from every test.
pub fn init_test_tracing() {
    // Only the first call installs the global subscriber.
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::TRACE)
        .with_thread_names(true)
        .try_init();
}
