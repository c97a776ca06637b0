use metrics::{Counter, Histogram};
use metrics_derive::Metrics;
use zkrollup_primitives::RollupEvent;

/// The metrics for the [`super::RollupScanner`].
#[derive(Metrics)]
#[metrics(scope = "rollup_scanner")]
pub struct ScannerMetrics {
    /// A counter on the global exit root updates decoded.
    pub global_exit_roots: Counter,
    /// A counter on the forced batches decoded.
    pub forced_batches: Counter,
    /// A counter on the sequencing submissions decoded.
    pub sequenced_batches: Counter,
    /// A counter on the verified batches decoded.
    pub verified_batches: Counter,
    /// A counter on the force sequencing submissions decoded.
    pub sequenced_force_batches: Counter,
    /// A histogram of scan durations in seconds.
    pub scan_duration: Histogram,
}

impl ScannerMetrics {
    /// Processed a rollup event by updating the appropriate metric.
    pub fn process_event(&self, event: &RollupEvent) {
        match event {
            RollupEvent::GlobalExitRoot(_) => self.global_exit_roots.increment(1),
            RollupEvent::ForcedBatch(_) => self.forced_batches.increment(1),
            RollupEvent::SequencedBatches(_) => self.sequenced_batches.increment(1),
            RollupEvent::VerifiedBatch(_) => self.verified_batches.increment(1),
            RollupEvent::SequencedForceBatches(_) => self.sequenced_force_batches.increment(1),
        }
    }
}
