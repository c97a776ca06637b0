use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the [`super::TransactionSequencer`].
#[derive(Metrics)]
#[metrics(scope = "transaction_sequencer")]
pub struct SequencerMetrics {
    /// A counter on the sequencing transactions submitted.
    pub submissions: Counter,
    /// A counter on the batches packed in submitted transactions.
    pub sequenced_batches: Counter,
}
