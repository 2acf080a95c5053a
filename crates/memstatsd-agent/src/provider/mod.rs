//! Sources of memory-management statistics.
//!
//! A provider is non-failing by contract: whatever it cannot read is reported
//! as zero, so the reporter never needs a recovery path.

pub mod counting;
pub mod process;
#[cfg(feature = "jemalloc")]
pub mod jemalloc;

use std::sync::Arc;

use memstatsd_core::MemorySnapshot;

pub use counting::{AllocCounters, CountingAllocator};
pub use process::ProcessStatsProvider;
#[cfg(feature = "jemalloc")]
pub use jemalloc::JemallocStatsProvider;

/// Reads the current memory statistics of this process.
pub trait StatsProvider: Send + Sync {
    fn read(&self) -> MemorySnapshot;
}

impl<T: StatsProvider + ?Sized> StatsProvider for Arc<T> {
    fn read(&self) -> MemorySnapshot {
        (**self).read()
    }
}
