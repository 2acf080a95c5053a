//! jemalloc-backed provider (feature `jemalloc`).
//!
//! Requires `tikv_jemallocator::Jemalloc` to back the global allocator,
//! ideally wrapped in a [`CountingAllocator`] so allocation counts are known.

use memstatsd_core::MemorySnapshot;
use tikv_jemalloc_ctl::{epoch, stats};
use tikv_jemallocator::Jemalloc;
use tracing::warn;

use super::counting::CountingAllocator;
use super::process::ProcessFigures;
use super::StatsProvider;

pub struct JemallocStatsProvider {
    allocator: Option<&'static CountingAllocator<Jemalloc>>,
    process: ProcessFigures,
}

impl JemallocStatsProvider {
    pub fn new() -> Self {
        Self {
            allocator: None,
            process: ProcessFigures::new(),
        }
    }

    pub fn with_allocator(mut self, allocator: &'static CountingAllocator<Jemalloc>) -> Self {
        self.allocator = Some(allocator);
        self
    }
}

impl Default for JemallocStatsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsProvider for JemallocStatsProvider {
    fn read(&self) -> MemorySnapshot {
        // Stats are cached by jemalloc until the epoch advances.
        if let Err(err) = epoch::advance() {
            warn!(?err, "failed to advance jemalloc epoch");
        }

        let allocated = read_or_zero("allocated", stats::allocated::read());
        let active = read_or_zero("active", stats::active::read());
        let resident = read_or_zero("resident", stats::resident::read());
        let mapped = read_or_zero("mapped", stats::mapped::read());
        let retained = read_or_zero("retained", stats::retained::read());

        let counters = self.allocator.map(|a| a.counters()).unwrap_or_default();
        let (_, threads) = self.process.read();

        MemorySnapshot {
            alloc: allocated,
            sys: mapped,
            mallocs: counters.mallocs,
            frees: counters.frees,
            heap_alloc: allocated,
            heap_sys: resident,
            heap_idle: mapped.saturating_sub(active),
            heap_inuse: active,
            heap_released: retained,
            heap_objects: counters.live_objects(),
            num_threads: threads,
            total_alloc: counters.total_bytes,
            ..MemorySnapshot::default()
        }
    }
}

fn read_or_zero(stat: &'static str, r: Result<usize, tikv_jemalloc_ctl::Error>) -> u64 {
    match r {
        Ok(v) => v as u64,
        Err(err) => {
            warn!(stat, ?err, "failed to read jemalloc stat");
            0
        }
    }
}
