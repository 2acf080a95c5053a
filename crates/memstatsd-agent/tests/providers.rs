//! Built-in statistics providers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::alloc::{GlobalAlloc, Layout};

use memstatsd_agent::provider::{CountingAllocator, ProcessStatsProvider};
use memstatsd_agent::StatsProvider;

static COUNTING: CountingAllocator = CountingAllocator::new();

#[test]
fn counting_allocator_tracks_live_and_cumulative_bytes() {
    let alloc = CountingAllocator::new();
    let layout = Layout::from_size_align(256, 8).unwrap();

    unsafe {
        let a = alloc.alloc(layout);
        let b = alloc.alloc_zeroed(layout);
        assert!(!a.is_null() && !b.is_null());

        let c = alloc.counters();
        assert_eq!(c.live_bytes, 512);
        assert_eq!(c.mallocs, 2);
        assert_eq!(c.live_objects(), 2);

        let a = alloc.realloc(a, layout, 1024);
        assert!(!a.is_null());
        let c = alloc.counters();
        assert_eq!(c.live_bytes, 256 + 1024);
        assert_eq!(c.total_bytes, 256 + 256 + 1024);

        alloc.dealloc(a, Layout::from_size_align(1024, 8).unwrap());
        alloc.dealloc(b, layout);
    }

    let c = alloc.counters();
    assert_eq!(c.live_bytes, 0);
    assert_eq!(c.mallocs, c.frees);
    assert_eq!(c.live_objects(), 0);
}

#[test]
fn process_provider_maps_allocator_counters() {
    let layout = Layout::from_size_align(4096, 8).unwrap();
    let ptr = unsafe { COUNTING.alloc(layout) };

    let provider = ProcessStatsProvider::new().with_allocator(&COUNTING);
    let s = provider.read();
    assert_eq!(s.alloc, 4096);
    assert_eq!(s.heap_alloc, s.alloc);
    assert_eq!(s.heap_inuse, s.alloc);
    assert_eq!(s.heap_objects, 1);
    assert_eq!(s.total_alloc, 4096);
    assert_eq!(s.heap_sys, s.sys);
    assert!(s.heap_idle <= s.heap_sys);
    assert_eq!(s.num_gc, 0);

    unsafe { COUNTING.dealloc(ptr, layout) };
}

#[test]
fn process_provider_without_allocator_reports_zero_counters() {
    let s = ProcessStatsProvider::new().read();
    assert_eq!(s.mallocs, 0);
    assert_eq!(s.alloc, 0);
    assert_eq!(s.heap_idle, s.heap_sys);
}

#[cfg(feature = "jemalloc")]
mod jemalloc {
    use memstatsd_agent::provider::{CountingAllocator, JemallocStatsProvider};
    use memstatsd_agent::StatsProvider;
    use tikv_jemallocator::Jemalloc;

    #[global_allocator]
    static GLOBAL: CountingAllocator<Jemalloc> = CountingAllocator::with_allocator(Jemalloc);

    #[test]
    fn jemalloc_provider_reports_threads_and_allocation_counts() {
        let keep = vec![1u8; 64 * 1024];
        let s = JemallocStatsProvider::new().with_allocator(&GLOBAL).read();

        assert!(s.num_threads > 0);
        assert!(s.alloc > 0);
        assert!(s.heap_inuse > 0);
        assert!(s.mallocs > 0);
        assert_eq!(s.heap_objects, s.mallocs - s.frees);
        assert!(s.total_alloc >= keep.len() as u64);
        drop(keep);
    }
}
