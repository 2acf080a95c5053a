//! Debug tracing: one timestamped line per tick, metrics unchanged.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;

use common::{CapturedLogs, RecordingStatter, ScriptedProvider};
use memstatsd_agent::reporter::{AllocLatencyReporter, MemStatsReporter, ProbeSettings};
use memstatsd_core::{MemorySnapshot, SignedDuration};

fn snaps() -> Vec<MemorySnapshot> {
    vec![
        MemorySnapshot { heap_inuse: 1000, alloc: 500, ..Default::default() },
        MemorySnapshot { heap_inuse: 1200, alloc: 500, ..Default::default() },
    ]
}

fn run_mem_stats(debug: bool) -> (Arc<RecordingStatter>, String) {
    let statter = Arc::new(RecordingStatter::default());
    let provider = Arc::new(ScriptedProvider::new(snaps()));
    let mut r = MemStatsReporter::new("app.", statter.clone(), provider).with_debug(debug);

    let logs = CapturedLogs::default();
    logs.capture(|| {
        r.tick();
        r.tick();
    });
    (statter, logs.contents())
}

fn run_alloc_latency(debug: bool) -> (Arc<RecordingStatter>, String) {
    let statter = Arc::new(RecordingStatter::default());
    let mut r = AllocLatencyReporter::new("app.", statter.clone(), ProbeSettings::default())
        .with_debug(debug);

    let logs = CapturedLogs::default();
    logs.capture(|| {
        r.record(SignedDuration::from_millis(3));
        r.record(SignedDuration::from_millis(5));
    });
    (statter, logs.contents())
}

#[test]
fn mem_stats_debug_logs_each_tick_without_changing_metrics() {
    let (loud, loud_logs) = run_mem_stats(true);
    let (quiet, quiet_logs) = run_mem_stats(false);

    assert_eq!(loud.calls(), quiet.calls());
    assert_eq!(loud_logs.matches("push mem stats").count(), 2);
    assert!(loud_logs.contains("at="));
    assert!(!quiet_logs.contains("push mem stats"));
}

#[test]
fn alloc_latency_debug_logs_each_tick_without_changing_metrics() {
    let (loud, loud_logs) = run_alloc_latency(true);
    let (quiet, quiet_logs) = run_alloc_latency(false);

    assert_eq!(loud.calls(), quiet.calls());
    assert_eq!(loud_logs.matches("push alloc latency").count(), 2);
    assert!(loud_logs.contains("at="));
    assert!(!quiet_logs.contains("push alloc latency"));
}
