use std::time::Duration;

use serde::Deserialize;
use memstatsd_core::error::{MemStatsdError, Result};

use crate::agent::AgentSettings;
use crate::reporter::ProbeSettings;

const MAX_PROBE_ALLOC_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    #[serde(default)]
    pub agent: AgentSection,

    /// Absent: observations are written to the log instead.
    #[serde(default)]
    pub statsd: Option<StatsdSection>,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MemStatsdError::UnsupportedVersion);
        }

        self.agent.validate()?;
        if let Some(statsd) = &self.statsd {
            statsd.validate()?;
        }

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.agent.interval_ms)
    }

    pub fn settings(&self) -> AgentSettings {
        AgentSettings {
            prefix: self.agent.prefix.clone(),
            debug: self.agent.debug,
            probe: ProbeSettings {
                sleep: Duration::from_millis(self.agent.probe_sleep_ms),
                alloc_bytes: self.agent.probe_alloc_bytes,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSection {
    #[serde(default)]
    pub prefix: String,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_probe_sleep_ms")]
    pub probe_sleep_ms: u64,

    #[serde(default = "default_probe_alloc_bytes")]
    pub probe_alloc_bytes: usize,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            interval_ms: default_interval_ms(),
            debug: false,
            probe_sleep_ms: default_probe_sleep_ms(),
            probe_alloc_bytes: default_probe_alloc_bytes(),
        }
    }
}

impl AgentSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=3_600_000).contains(&self.interval_ms) {
            return Err(MemStatsdError::Config(
                "agent.interval_ms must be between 100 and 3600000".into(),
            ));
        }
        if self.probe_sleep_ms == 0 || self.probe_sleep_ms >= self.interval_ms {
            return Err(MemStatsdError::Config(
                "agent.probe_sleep_ms must be non-zero and less than interval_ms".into(),
            ));
        }
        if !(1..=MAX_PROBE_ALLOC_BYTES).contains(&self.probe_alloc_bytes) {
            return Err(MemStatsdError::Config(format!(
                "agent.probe_alloc_bytes must be between 1 and {MAX_PROBE_ALLOC_BYTES}"
            )));
        }
        Ok(())
    }
}

fn default_interval_ms() -> u64 {
    10_000
}
fn default_probe_sleep_ms() -> u64 {
    100
}
fn default_probe_alloc_bytes() -> usize {
    10 * 1024
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsdSection {
    /// `host:port` of the collector.
    pub addr: String,
}

impl StatsdSection {
    pub fn validate(&self) -> Result<()> {
        if self.addr.trim().is_empty() {
            return Err(MemStatsdError::Config("statsd.addr must not be empty".into()));
        }
        if !self.addr.contains(':') {
            return Err(MemStatsdError::Config("statsd.addr must be host:port".into()));
        }
        Ok(())
    }
}
