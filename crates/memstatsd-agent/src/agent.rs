//! Reporting agent: composition and lifecycle.
//!
//! `start` spawns one tokio task per reporter. Each task is a single
//! sequential loop, so a reporter's ticks never overlap; a tick that runs
//! long delays the next one (`MissedTickBehavior::Delay`). Shutdown is a
//! `watch` signal that every loop polls first (`biased`), and `stop` joins
//! both tasks, so nothing is emitted once `stop` has returned.

use std::sync::Arc;
use std::time::Duration;

use memstatsd_core::error::{MemStatsdError, Result};
use memstatsd_core::Statter;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::provider::StatsProvider;
use crate::reporter::{measure_alloc_latency, AllocLatencyReporter, MemStatsReporter, ProbeSettings};

/// Construction parameters shared by both reporters.
#[derive(Debug, Clone, Default)]
pub struct AgentSettings {
    /// Prepended to every metric name, e.g. `"app."`.
    pub prefix: String,
    /// Log a timestamped line on every tick. Default `false`.
    pub debug: bool,
    pub probe: ProbeSettings,
}

impl AgentSettings {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }
}

pub struct Agent {
    mem_stats: MemStatsReporter,
    alloc_latency: AllocLatencyReporter,
}

impl Agent {
    pub fn new(
        settings: AgentSettings,
        statter: Arc<dyn Statter>,
        provider: Arc<dyn StatsProvider>,
    ) -> Self {
        let mem_stats = MemStatsReporter::new(&settings.prefix, Arc::clone(&statter), provider)
            .with_debug(settings.debug);
        let alloc_latency = AllocLatencyReporter::new(&settings.prefix, statter, settings.probe)
            .with_debug(settings.debug);
        Self { mem_stats, alloc_latency }
    }

    /// Schedule both reporters every `interval` and return immediately.
    ///
    /// The first tick fires one full interval after this call.
    pub fn start(self, interval: Duration) -> Result<AgentHandle> {
        if interval.is_zero() {
            return Err(MemStatsdError::InvalidInterval);
        }
        let rt = tokio::runtime::Handle::try_current().map_err(|_| MemStatsdError::NoRuntime)?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let tasks = vec![
            rt.spawn(run_mem_stats(self.mem_stats, interval, shutdown_rx.clone())),
            rt.spawn(run_alloc_latency(self.alloc_latency, interval, shutdown_rx)),
        ];

        tracing::info!(interval_ms = interval.as_millis() as u64, "memstatsd agent started");
        Ok(AgentHandle { shutdown: shutdown_tx, tasks })
    }
}

/// Running agent. Dropping it signals shutdown without waiting.
pub struct AgentHandle {
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl AgentHandle {
    /// Halt both reporters and wait for their tasks to exit.
    pub async fn stop(mut self) {
        self.shutdown.send_replace(true);
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "reporter task ended abnormally");
            }
        }
        tracing::info!("memstatsd agent stopped");
    }
}

impl Drop for AgentHandle {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}

fn ticker(period: Duration) -> Interval {
    let mut t = tokio::time::interval_at(Instant::now() + period, period);
    t.set_missed_tick_behavior(MissedTickBehavior::Delay);
    t
}

async fn run_mem_stats(
    mut reporter: MemStatsReporter,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut tick = ticker(interval);
    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = tick.tick() => reporter.tick(),
        }
    }
    tracing::debug!("mem stats reporter exited");
}

async fn run_alloc_latency(
    mut reporter: AllocLatencyReporter,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut tick = ticker(interval);
    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = tick.tick() => {}
        }

        // A probe interrupted by shutdown is discarded, not recorded.
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            latency = measure_alloc_latency(reporter.probe()) => {
                reporter.record(latency);
            }
        }
    }
    tracing::debug!("alloc latency reporter exited");
}
