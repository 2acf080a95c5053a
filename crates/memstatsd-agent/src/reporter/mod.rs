//! The two periodic reporters. Each owns its own "previous" slot and is
//! driven by exactly one task, so neither needs locking.

pub mod alloc_latency;
pub mod mem_stats;

pub use alloc_latency::{measure_alloc_latency, AllocLatencyReporter, ProbeSettings};
pub use mem_stats::MemStatsReporter;
