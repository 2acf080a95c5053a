//! Allocation-counting global allocator.
//!
//! Wraps another [`GlobalAlloc`] (the system allocator by default) and keeps
//! relaxed atomic counters. Install it with `#[global_allocator]` and hand a
//! `&'static` reference to [`ProcessStatsProvider`](super::ProcessStatsProvider).

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter values read from a [`CountingAllocator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocCounters {
    /// Bytes currently allocated.
    pub live_bytes: u64,
    /// Bytes ever allocated.
    pub total_bytes: u64,
    pub mallocs: u64,
    pub frees: u64,
}

impl AllocCounters {
    pub fn live_objects(&self) -> u64 {
        self.mallocs.saturating_sub(self.frees)
    }
}

pub struct CountingAllocator<A = System> {
    inner: A,
    live_bytes: AtomicU64,
    total_bytes: AtomicU64,
    mallocs: AtomicU64,
    frees: AtomicU64,
}

impl CountingAllocator<System> {
    pub const fn new() -> Self {
        Self::with_allocator(System)
    }
}

impl Default for CountingAllocator<System> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> CountingAllocator<A> {
    pub const fn with_allocator(inner: A) -> Self {
        Self {
            inner,
            live_bytes: AtomicU64::new(0),
            total_bytes: AtomicU64::new(0),
            mallocs: AtomicU64::new(0),
            frees: AtomicU64::new(0),
        }
    }

    pub fn counters(&self) -> AllocCounters {
        AllocCounters {
            live_bytes: self.live_bytes.load(Ordering::Relaxed),
            total_bytes: self.total_bytes.load(Ordering::Relaxed),
            mallocs: self.mallocs.load(Ordering::Relaxed),
            frees: self.frees.load(Ordering::Relaxed),
        }
    }

    fn record_alloc(&self, size: usize) {
        let size = size as u64;
        self.live_bytes.fetch_add(size, Ordering::Relaxed);
        self.total_bytes.fetch_add(size, Ordering::Relaxed);
        self.mallocs.fetch_add(1, Ordering::Relaxed);
    }

    fn record_free(&self, size: usize) {
        self.live_bytes.fetch_sub(size as u64, Ordering::Relaxed);
        self.frees.fetch_add(1, Ordering::Relaxed);
    }
}

// SAFETY: every call is forwarded unchanged to `inner`; the wrapper only
// updates counters after the inner allocator has succeeded.
unsafe impl<A: GlobalAlloc> GlobalAlloc for CountingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc(layout);
        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = self.inner.alloc_zeroed(layout);
        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.inner.dealloc(ptr, layout);
        self.record_free(layout.size());
    }

    // A successful realloc counts as a free of the old block plus a malloc of
    // the new one.
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = self.inner.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            self.record_free(layout.size());
            self.record_alloc(new_size);
        }
        new_ptr
    }
}
