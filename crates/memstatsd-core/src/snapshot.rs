//! Memory-statistics snapshot and its field-wise delta.

use serde::{Deserialize, Serialize};

use crate::delta::Delta;
use crate::duration::SignedDuration;
use crate::names::GAUGE_SUFFIXES;

/// Point-in-time capture of the process's memory-management counters.
///
/// Cumulative counters (`mallocs`, `frees`, `total_alloc`, `num_gc`) only
/// grow; the rest are instantaneous and may move either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    // General
    /// Bytes allocated and not yet freed.
    pub alloc: u64,
    /// Bytes obtained from the system.
    pub sys: u64,
    /// Pointer lookups performed by the runtime.
    pub lookups: u64,
    pub mallocs: u64,
    pub frees: u64,

    // Heap
    pub heap_alloc: u64,
    pub heap_sys: u64,
    pub heap_idle: u64,
    pub heap_inuse: u64,
    pub heap_released: u64,
    /// Live heap objects.
    pub heap_objects: u64,

    // GC
    pub num_gc: u32,
    /// Duration of the most recent collection pause.
    pub pause_gc: SignedDuration,

    // Misc
    /// Live OS threads, reported under the `num_goroutine` suffix.
    pub num_threads: u64,
    /// Cumulative bytes ever allocated. Carried but not emitted.
    pub total_alloc: u64,
}

impl MemorySnapshot {
    /// Gauge values aligned with [`GAUGE_SUFFIXES`].
    pub fn gauge_values(&self) -> [i64; GAUGE_SUFFIXES.len()] {
        [
            to_gauge(self.alloc),
            to_gauge(self.sys),
            to_gauge(self.lookups),
            to_gauge(self.mallocs),
            to_gauge(self.frees),
            to_gauge(self.heap_alloc),
            to_gauge(self.heap_sys),
            to_gauge(self.heap_idle),
            to_gauge(self.heap_inuse),
            to_gauge(self.heap_released),
            to_gauge(self.heap_objects),
            i64::from(self.num_gc),
            to_gauge(self.num_threads),
        ]
    }
}

/// Field-wise `current - previous`. The all-zero value (`Default`) stands for
/// "no baseline yet".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDelta {
    pub alloc: i64,
    pub sys: i64,
    pub lookups: i64,
    pub mallocs: i64,
    pub frees: i64,

    pub heap_alloc: i64,
    pub heap_sys: i64,
    pub heap_idle: i64,
    pub heap_inuse: i64,
    pub heap_released: i64,
    pub heap_objects: i64,

    pub num_gc: i64,
    pub pause_gc: SignedDuration,

    pub num_threads: i64,
    pub total_alloc: i64,
}

impl MemoryDelta {
    /// Gauge values aligned with [`GAUGE_SUFFIXES`].
    pub fn gauge_values(&self) -> [i64; GAUGE_SUFFIXES.len()] {
        [
            self.alloc,
            self.sys,
            self.lookups,
            self.mallocs,
            self.frees,
            self.heap_alloc,
            self.heap_sys,
            self.heap_idle,
            self.heap_inuse,
            self.heap_released,
            self.heap_objects,
            self.num_gc,
            self.num_threads,
        ]
    }

    pub fn is_zero(&self) -> bool {
        *self == MemoryDelta::default()
    }
}

impl Delta for MemorySnapshot {
    type Output = MemoryDelta;

    fn delta_since(&self, prev: &Self) -> MemoryDelta {
        MemoryDelta {
            alloc: diff(self.alloc, prev.alloc),
            sys: diff(self.sys, prev.sys),
            lookups: diff(self.lookups, prev.lookups),
            mallocs: diff(self.mallocs, prev.mallocs),
            frees: diff(self.frees, prev.frees),
            heap_alloc: diff(self.heap_alloc, prev.heap_alloc),
            heap_sys: diff(self.heap_sys, prev.heap_sys),
            heap_idle: diff(self.heap_idle, prev.heap_idle),
            heap_inuse: diff(self.heap_inuse, prev.heap_inuse),
            heap_released: diff(self.heap_released, prev.heap_released),
            heap_objects: diff(self.heap_objects, prev.heap_objects),
            num_gc: i64::from(self.num_gc) - i64::from(prev.num_gc),
            pause_gc: self.pause_gc - prev.pause_gc,
            num_threads: diff(self.num_threads, prev.num_threads),
            total_alloc: diff(self.total_alloc, prev.total_alloc),
        }
    }
}

fn to_gauge(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

fn diff(current: u64, previous: u64) -> i64 {
    let d = i128::from(current) - i128::from(previous);
    i64::try_from(d).unwrap_or(if d < 0 { i64::MIN } else { i64::MAX })
}
