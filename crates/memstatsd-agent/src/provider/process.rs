//! Default provider: allocator counters plus process figures from `sysinfo`.

use std::sync::Mutex;

use memstatsd_core::MemorySnapshot;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use super::counting::{AllocCounters, CountingAllocator};
use super::StatsProvider;

/// OS view of this process, shared by every provider.
pub(crate) struct ProcessFigures {
    pid: Option<Pid>,
    system: Mutex<System>,
}

impl ProcessFigures {
    pub(crate) fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = %e, "cannot resolve current pid; process stats disabled");
                None
            }
        };
        Self {
            pid,
            system: Mutex::new(System::new()),
        }
    }

    /// Resident bytes and live thread count, zero when unavailable.
    pub(crate) fn read(&self) -> (u64, u64) {
        let Some(pid) = self.pid else { return (0, 0); };
        let mut sys = self.system.lock().unwrap_or_else(|e| e.into_inner());
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory().with_tasks(),
        );
        match sys.process(pid) {
            Some(p) => {
                let threads = p.tasks().map(|t| t.len() as u64).unwrap_or(1);
                (p.memory(), threads)
            }
            None => (0, 0),
        }
    }
}

/// Builds snapshots from a [`CountingAllocator`] and the OS view of this
/// process.
///
/// Rust has no garbage collector, so `num_gc`, `pause_gc`, `lookups` and
/// `heap_released` stay at zero. Without an allocator reference the
/// allocation counters are zero as well and only `sys`/`heap_sys` and the
/// thread count move.
pub struct ProcessStatsProvider {
    allocator: Option<&'static CountingAllocator>,
    process: ProcessFigures,
}

impl ProcessStatsProvider {
    pub fn new() -> Self {
        Self {
            allocator: None,
            process: ProcessFigures::new(),
        }
    }

    pub fn with_allocator(mut self, allocator: &'static CountingAllocator) -> Self {
        self.allocator = Some(allocator);
        self
    }
}

impl Default for ProcessStatsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsProvider for ProcessStatsProvider {
    fn read(&self) -> MemorySnapshot {
        let counters = self.allocator.map(|a| a.counters()).unwrap_or_default();
        let (resident, threads) = self.process.read();
        snapshot_from(counters, resident, threads)
    }
}

fn snapshot_from(c: AllocCounters, resident: u64, threads: u64) -> MemorySnapshot {
    MemorySnapshot {
        alloc: c.live_bytes,
        sys: resident,
        mallocs: c.mallocs,
        frees: c.frees,
        heap_alloc: c.live_bytes,
        heap_sys: resident,
        heap_idle: resident.saturating_sub(c.live_bytes),
        heap_inuse: c.live_bytes,
        heap_objects: c.live_objects(),
        num_threads: threads,
        total_alloc: c.total_bytes,
        ..MemorySnapshot::default()
    }
}
