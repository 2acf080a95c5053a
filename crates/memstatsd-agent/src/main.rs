//! memstatsd agent binary.
//!
//! Loads `memstatsd.yaml` (or the path given as the first argument), reports
//! this process's memory statistics until Ctrl-C, then stops cleanly.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use memstatsd_agent::obs::{LogStatter, UdpStatter};
use memstatsd_agent::{config, Agent, StatsProvider};
use memstatsd_core::error::Result;
use memstatsd_core::Statter;

#[cfg(not(feature = "jemalloc"))]
#[global_allocator]
static GLOBAL: memstatsd_agent::provider::CountingAllocator =
    memstatsd_agent::provider::CountingAllocator::new();

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: memstatsd_agent::provider::CountingAllocator<tikv_jemallocator::Jemalloc> =
    memstatsd_agent::provider::CountingAllocator::with_allocator(tikv_jemallocator::Jemalloc);

#[cfg(not(feature = "jemalloc"))]
fn stats_provider() -> Arc<dyn StatsProvider> {
    Arc::new(memstatsd_agent::provider::ProcessStatsProvider::new().with_allocator(&GLOBAL))
}

#[cfg(feature = "jemalloc")]
fn stats_provider() -> Arc<dyn StatsProvider> {
    Arc::new(memstatsd_agent::provider::JemallocStatsProvider::new().with_allocator(&GLOBAL))
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "memstatsd-agent failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "memstatsd.yaml".to_string());
    let cfg = config::load_from_file(&path)?;

    let statter: Arc<dyn Statter> = match &cfg.statsd {
        Some(s) => Arc::new(UdpStatter::connect(s.addr.as_str())?),
        None => {
            tracing::info!("no statsd section; writing metrics to the log");
            Arc::new(LogStatter)
        }
    };

    let handle = Agent::new(cfg.settings(), statter, stats_provider()).start(cfg.interval())?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    handle.stop().await;
    Ok(())
}
