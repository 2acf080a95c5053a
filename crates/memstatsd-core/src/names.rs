//! Stable metric suffixes.
//!
//! Downstream dashboards key on these strings; renaming one is a breaking
//! change. Full names are `prefix + suffix`, and `prefix + suffix + ".delta"`
//! for the delta variant.

pub const ALLOC: &str = "alloc";
pub const SYS: &str = "sys";
pub const LOOKUPS: &str = "lookups";
pub const MALLOCS: &str = "mallocs";
pub const FREES: &str = "frees";
pub const HEAP_ALLOC: &str = "heap_alloc";
pub const HEAP_SYS: &str = "heap_sys";
pub const HEAP_IDLE: &str = "heap_idle";
pub const HEAP_INUSE: &str = "heap_inuse";
pub const HEAP_RELEASED: &str = "heap_released";
pub const HEAP_OBJECTS: &str = "heap_objects";
pub const NUM_GC: &str = "num_gc";
pub const NUM_GOROUTINE: &str = "num_goroutine";

pub const PAUSE_GC: &str = "pause_gc";
pub const ALLOC_LATENCY: &str = "alloc_latency";

pub const DELTA_MARKER: &str = ".delta";

/// Gauge suffixes in emission order: general counters, heap counters, GC
/// counters, then the thread count.
pub const GAUGE_SUFFIXES: [&str; 13] = [
    ALLOC,
    SYS,
    LOOKUPS,
    MALLOCS,
    FREES,
    HEAP_ALLOC,
    HEAP_SYS,
    HEAP_IDLE,
    HEAP_INUSE,
    HEAP_RELEASED,
    HEAP_OBJECTS,
    NUM_GC,
    NUM_GOROUTINE,
];

pub fn metric_name(prefix: &str, suffix: &str) -> String {
    format!("{prefix}{suffix}")
}

pub fn delta_name(prefix: &str, suffix: &str) -> String {
    format!("{prefix}{suffix}{DELTA_MARKER}")
}
