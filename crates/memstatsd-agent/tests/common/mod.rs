//! Shared test doubles: a call-recording statter and a scripted provider.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use memstatsd_agent::StatsProvider;
use memstatsd_core::{MemorySnapshot, SignedDuration, Statter};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Gauge(String, i64),
    Timing(String, SignedDuration),
}

impl Call {
    pub fn name(&self) -> &str {
        match self {
            Call::Gauge(n, _) | Call::Timing(n, _) => n,
        }
    }
}

/// Records every call in order.
#[derive(Default)]
pub struct RecordingStatter {
    calls: Mutex<Vec<Call>>,
}

impl RecordingStatter {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.name() == name).count()
    }

    pub fn last_gauge(&self, name: &str) -> Option<i64> {
        self.calls.lock().unwrap().iter().rev().find_map(|c| match c {
            Call::Gauge(n, v) if n == name => Some(*v),
            _ => None,
        })
    }
}

impl Statter for RecordingStatter {
    fn gauge(&self, name: &str, value: i64) {
        self.calls.lock().unwrap().push(Call::Gauge(name.to_string(), value));
    }

    fn timing(&self, name: &str, value: SignedDuration) {
        self.calls.lock().unwrap().push(Call::Timing(name.to_string(), value));
    }
}

/// Returns queued snapshots in order, then repeats the last one.
#[derive(Default)]
pub struct ScriptedProvider {
    queue: Mutex<VecDeque<MemorySnapshot>>,
    last: Mutex<MemorySnapshot>,
}

impl ScriptedProvider {
    pub fn new(snapshots: impl IntoIterator<Item = MemorySnapshot>) -> Self {
        Self {
            queue: Mutex::new(snapshots.into_iter().collect()),
            last: Mutex::new(MemorySnapshot::default()),
        }
    }
}

impl StatsProvider for ScriptedProvider {
    fn read(&self) -> MemorySnapshot {
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.queue.lock().unwrap().pop_front() {
            *last = next;
        }
        *last
    }
}

/// Collects formatted tracing output produced inside [`CapturedLogs::capture`].
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> CapturedWriter {
        CapturedWriter(Arc::clone(&self.buf))
    }
}
