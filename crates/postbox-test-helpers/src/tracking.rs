//! Allocation tracking.
//!
//! Install [`TrackingAllocator`] as the global allocator of a test binary, then
//! open an [`AllocationGuard`] around the code that must not allocate. Counts are
//! per thread, so allocations made by other test threads do not leak in.
//!
//! ```rust,ignore
//! #[global_allocator]
//! static GLOBAL: postbox_test_helpers::tracking::TrackingAllocator =
//!     postbox_test_helpers::tracking::TrackingAllocator;
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
    static ALLOCATION_COUNT: Cell<usize> = const { Cell::new(0) };
    static ALLOCATION_BYTES: Cell<usize> = const { Cell::new(0) };
    static TRACKING_DEPTH: Cell<usize> = const { Cell::new(0) };
}

fn tracking_enabled() -> bool {
    TRACKING_DEPTH.with(|depth| depth.get() > 0)
}

fn record(bytes: usize) {
    ALLOCATION_COUNT.with(|count| count.set(count.get().saturating_add(1)));
    ALLOCATION_BYTES.with(|total| total.set(total.get().saturating_add(bytes)));
}

/// Global allocator that counts allocations made on threads with an open guard.
#[derive(Debug)]
pub struct TrackingAllocator;

// SAFETY: every call is forwarded unchanged to the system allocator; the
// bookkeeping only touches const-initialized thread locals, which never allocate.
unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: forwarded with the caller's layout.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() && tracking_enabled() {
            record(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was allocated by `System` with this layout.
        unsafe { System.dealloc(ptr, layout) };
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: `ptr` was allocated by `System` with this layout.
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() && tracking_enabled() && new_size > layout.size() {
            record(new_size - layout.size());
        }
        new_ptr
    }
}

/// Scope during which allocations on the current thread are counted.
#[derive(Debug)]
pub struct AllocationGuard {
    start_count: usize,
    start_bytes: usize,
}

impl AllocationGuard {
    /// Start counting on the current thread.
    #[must_use]
    pub fn new() -> Self {
        TRACKING_DEPTH.with(|depth| depth.set(depth.get().saturating_add(1)));
        Self {
            start_count: ALLOCATION_COUNT.with(Cell::get),
            start_bytes: ALLOCATION_BYTES.with(Cell::get),
        }
    }

    /// Allocations made since the guard was opened.
    #[must_use]
    pub fn allocations(&self) -> usize {
        ALLOCATION_COUNT
            .with(Cell::get)
            .saturating_sub(self.start_count)
    }

    /// Bytes allocated since the guard was opened.
    #[must_use]
    pub fn bytes(&self) -> usize {
        ALLOCATION_BYTES
            .with(Cell::get)
            .saturating_sub(self.start_bytes)
    }

    /// Returns `true` if anything was allocated since the guard was opened.
    #[must_use]
    pub fn has_allocations(&self) -> bool {
        self.allocations() > 0
    }
}

impl Default for AllocationGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AllocationGuard {
    fn drop(&mut self) {
        TRACKING_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Open an [`AllocationGuard`] on the current thread.
#[must_use]
pub fn track() -> AllocationGuard {
    AllocationGuard::new()
}

/// Panic if the guard observed any allocation.
#[macro_export]
macro_rules! assert_no_alloc {
    ($guard:expr) => {
        $crate::assert_no_alloc!($guard, "tracked scope")
    };
    ($guard:expr, $context:expr) => {{
        let guard = &$guard;
        let allocs = guard.allocations();
        if allocs > 0 {
            panic!(
                "allocation in '{}': {} allocations ({} bytes) at {}:{}",
                $context,
                allocs,
                guard.bytes(),
                file!(),
                line!()
            );
        }
    }};
}
