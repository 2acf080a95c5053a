use memstatsd_core::{SignedDuration, Statter};

/// Writes observations to the `memstatsd::metrics` tracing target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogStatter;

impl Statter for LogStatter {
    fn gauge(&self, name: &str, value: i64) {
        tracing::info!(target: "memstatsd::metrics", metric = name, value, "gauge");
    }

    fn timing(&self, name: &str, value: SignedDuration) {
        tracing::info!(target: "memstatsd::metrics", metric = name, %value, "timing");
    }
}
