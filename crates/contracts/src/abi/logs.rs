use alloy_primitives::Log;
use alloy_sol_types::{sol, SolEvent};

sol! {
    /// Emitted by the global exit root contract on every exit root update.
    #[derive(Debug)]
    event UpdateGlobalExitRoot(bytes32 indexed mainnetExitRoot, bytes32 indexed rollupExitRoot);

    /// Emitted by the rollup contract when a batch is forced. The
    /// `transactions` field is only populated when the forcing sender is a
    /// contract, so the payload is always recovered from calldata instead.
    #[derive(Debug)]
    event ForceBatch(
        uint64 indexed forceBatchNum,
        bytes32 lastGlobalExitRoot,
        address sequencer,
        bytes transactions
    );

    /// Emitted by the rollup contract when the trusted sequencer submits a
    /// sequence of batches. `numBatch` is the last batch number after the
    /// submission.
    #[derive(Debug)]
    event SequenceBatches(uint64 indexed numBatch);

    /// Emitted by the rollup contract when an aggregator verifies a batch.
    #[derive(Debug)]
    event VerifyBatches(uint64 indexed numBatch, bytes32 stateRoot, address indexed aggregator);

    /// Emitted by the rollup contract when pending forced batches are
    /// sequenced. The batch numbers span the inclusive range
    /// `firstBatchSequenced..=lastBatchSequenced`.
    #[derive(Debug)]
    event SequenceForceBatches(uint64 indexed firstBatchSequenced, uint64 lastBatchSequenced);
}

/// Tries to decode the provided log into the type T.
pub fn try_decode_log<T: SolEvent>(log: &Log) -> Option<Log<T>> {
    T::decode_log(log).ok()
}
