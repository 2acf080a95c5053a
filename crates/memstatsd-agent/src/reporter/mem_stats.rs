use std::sync::Arc;
use std::time::SystemTime;

use memstatsd_core::names::{self, delta_name, metric_name, GAUGE_SUFFIXES};
use memstatsd_core::{DeltaTracker, MemoryDelta, MemorySnapshot, Statter};

use crate::provider::StatsProvider;

/// Full metric names, built once from the prefix.
struct MemStatsNames {
    gauges: [String; GAUGE_SUFFIXES.len()],
    gauge_deltas: [String; GAUGE_SUFFIXES.len()],
    pause: String,
    pause_delta: String,
}

impl MemStatsNames {
    fn new(prefix: &str) -> Self {
        Self {
            gauges: GAUGE_SUFFIXES.map(|s| metric_name(prefix, s)),
            gauge_deltas: GAUGE_SUFFIXES.map(|s| delta_name(prefix, s)),
            pause: metric_name(prefix, names::PAUSE_GC),
            pause_delta: delta_name(prefix, names::PAUSE_GC),
        }
    }
}

/// Samples memory statistics and emits absolute values and deltas.
pub struct MemStatsReporter {
    statter: Arc<dyn Statter>,
    provider: Arc<dyn StatsProvider>,
    names: MemStatsNames,
    previous: DeltaTracker<MemorySnapshot>,
    debug: bool,
}

impl MemStatsReporter {
    pub fn new(prefix: &str, statter: Arc<dyn Statter>, provider: Arc<dyn StatsProvider>) -> Self {
        Self {
            statter,
            provider,
            names: MemStatsNames::new(prefix),
            previous: DeltaTracker::new(),
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Read the provider and advance the baseline.
    pub fn snapshot(&mut self) -> (MemorySnapshot, MemoryDelta) {
        let latest = self.provider.read();
        let delta = self.previous.observe(latest);
        (latest, delta)
    }

    /// One scheduled execution: sample, then emit 2 x 14 observations.
    pub fn tick(&mut self) {
        let (latest, delta) = self.snapshot();
        if self.debug {
            tracing::info!(at = ?SystemTime::now(), "push mem stats");
        }
        self.emit(&latest, &delta);
    }

    fn emit(&self, latest: &MemorySnapshot, delta: &MemoryDelta) {
        let s = &self.statter;

        for (name, value) in self.names.gauges.iter().zip(latest.gauge_values()) {
            s.gauge(name, value);
        }
        s.timing(&self.names.pause, latest.pause_gc);

        for (name, value) in self.names.gauge_deltas.iter().zip(delta.gauge_values()) {
            s.gauge(name, value);
        }
        s.timing(&self.names.pause_delta, delta.pause_gc);
    }
}
