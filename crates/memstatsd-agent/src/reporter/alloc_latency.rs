//! Allocation-latency probe.
//!
//! Latency is the wall time around `alloc, sleep, alloc` minus the sleep.
//! The figure is dominated by scheduler wake-up jitter and is reported raw,
//! negative values included.

use std::hint::black_box;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use memstatsd_core::names::{self, delta_name, metric_name};
use memstatsd_core::{DeltaTracker, SignedDuration, Statter};
use tokio::time::Instant;

/// Shape of one probe. Independent of the reporting interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Expected pause between the two allocations. Default 100ms.
    pub sleep: Duration,
    /// Size of each allocation. Default 10 KiB.
    pub alloc_bytes: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            sleep: Duration::from_millis(100),
            alloc_bytes: 10 * 1024,
        }
    }
}

/// Run one probe and return `elapsed - probe.sleep`.
pub async fn measure_alloc_latency(probe: ProbeSettings) -> SignedDuration {
    let start = Instant::now();
    let first = black_box(vec![0u8; probe.alloc_bytes]);
    tokio::time::sleep(probe.sleep).await;
    let second = black_box(vec![0u8; probe.alloc_bytes]);
    let elapsed = start.elapsed();
    drop((first, second));
    SignedDuration::from(elapsed) - SignedDuration::from(probe.sleep)
}

pub struct AllocLatencyReporter {
    statter: Arc<dyn Statter>,
    probe: ProbeSettings,
    name: String,
    name_delta: String,
    previous: DeltaTracker<SignedDuration>,
    debug: bool,
}

impl AllocLatencyReporter {
    pub fn new(prefix: &str, statter: Arc<dyn Statter>, probe: ProbeSettings) -> Self {
        Self {
            statter,
            probe,
            name: metric_name(prefix, names::ALLOC_LATENCY),
            name_delta: delta_name(prefix, names::ALLOC_LATENCY),
            previous: DeltaTracker::new(),
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn probe(&self) -> ProbeSettings {
        self.probe
    }

    /// Advance the baseline with a measured latency and emit both timings.
    /// Returns the delta.
    pub fn record(&mut self, latency: SignedDuration) -> SignedDuration {
        let delta = self.previous.observe(latency);
        if self.debug {
            tracing::info!(at = ?SystemTime::now(), %latency, "push alloc latency");
        }
        self.statter.timing(&self.name, latency);
        self.statter.timing(&self.name_delta, delta);
        delta
    }

    /// One scheduled execution: probe, then record.
    pub async fn tick(&mut self) -> SignedDuration {
        let latency = measure_alloc_latency(self.probe).await;
        self.record(latency)
    }
}
