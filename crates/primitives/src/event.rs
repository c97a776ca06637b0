use alloy_primitives::{keccak256, Address, Bytes, B256};

/// A global exit root update observed on the L1 exit root contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalExitRoot {
    /// The L1 block number the update was observed at.
    pub block_number: u64,
    /// The mainnet exit root.
    pub mainnet_exit_root: B256,
    /// The rollup exit root.
    pub rollup_exit_root: B256,
    /// The combined global exit root.
    pub global_exit_root: B256,
}

impl GlobalExitRoot {
    /// Returns a new [`GlobalExitRoot`], deriving the combined root from the
    /// mainnet and rollup exit roots.
    pub fn new(block_number: u64, mainnet_exit_root: B256, rollup_exit_root: B256) -> Self {
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(mainnet_exit_root.as_slice());
        preimage[32..].copy_from_slice(rollup_exit_root.as_slice());
        Self {
            block_number,
            mainnet_exit_root,
            rollup_exit_root,
            global_exit_root: keccak256(preimage),
        }
    }
}

/// A batch forced directly on the rollup contract, bypassing the trusted
/// sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedBatch {
    /// The L1 block number the batch was forced at.
    pub block_number: u64,
    /// The contract-assigned forced batch number, globally unique and
    /// strictly increasing.
    pub forced_batch_number: u64,
    /// The address that forced the batch.
    pub sequencer: Address,
    /// The global exit root in effect at force time.
    pub global_exit_root: B256,
    /// The raw L2 transactions, recovered from the forcing transaction's
    /// calldata.
    pub raw_txs_data: Bytes,
    /// The L1 block timestamp at force time.
    pub forced_at: u64,
}

/// A batch sequenced by the trusted sequencer, one entry per batch packed in
/// the sequencing transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencedBatch {
    /// The resulting L2 batch number.
    pub batch_number: u64,
    /// The sequencing transaction sender.
    pub coinbase: Address,
    /// The hash of the L1 sequencing transaction.
    pub tx_hash: B256,
    /// The nonce of the L1 sequencing transaction.
    pub nonce: u64,
    /// The global exit root embedded in the batch payload.
    pub global_exit_root: B256,
    /// The batch timestamp embedded in the payload.
    pub timestamp: u64,
    /// The L1-imposed minimum forced timestamp bound, zero for non-forced
    /// content.
    pub min_forced_timestamp: u64,
    /// The raw L2 transactions embedded in the payload.
    pub transactions: Bytes,
}

/// A batch proven and verified on L1 by an aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedBatch {
    /// The L1 block number the verification was observed at.
    pub block_number: u64,
    /// The verified L2 batch number.
    pub batch_number: u64,
    /// The aggregator address that submitted the proof.
    pub aggregator: Address,
    /// The resulting L2 state root.
    pub state_root: B256,
    /// The hash of the L1 verification transaction.
    pub tx_hash: B256,
}

/// A previously forced batch sequenced into the rollup, one entry per batch
/// in the sequencing transaction.
///
/// `min_forced_timestamp` records the actual force time of the correlated
/// [`ForcedBatch`], unlike [`SequencedBatch::min_forced_timestamp`] which is
/// an L1-imposed lower bound. The two are kept as distinct fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencedForceBatch {
    /// The resulting L2 batch number.
    pub batch_number: u64,
    /// The sequencing transaction sender.
    pub coinbase: Address,
    /// The hash of the L1 sequencing transaction.
    pub tx_hash: B256,
    /// The nonce of the L1 sequencing transaction.
    pub nonce: u64,
    /// The L1 block timestamp of the sequencing transaction.
    pub timestamp: u64,
    /// The global exit root of the correlated forced batch.
    pub global_exit_root: B256,
    /// The force time of the correlated forced batch.
    pub min_forced_timestamp: u64,
    /// The raw L2 transactions of the correlated forced batch.
    pub transactions: Bytes,
}

/// A single decoded rollup event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollupEvent {
    /// A global exit root update.
    GlobalExitRoot(GlobalExitRoot),
    /// A forced batch.
    ForcedBatch(ForcedBatch),
    /// The batches packed in one sequencing transaction.
    SequencedBatches(Vec<SequencedBatch>),
    /// A verified batch.
    VerifiedBatch(VerifiedBatch),
    /// The forced batches packed in one force-sequencing transaction.
    SequencedForceBatches(Vec<SequencedForceBatch>),
}

impl RollupEvent {
    /// Returns the [`EventKind`] for the event.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::GlobalExitRoot(_) => EventKind::GlobalExitRoot,
            Self::ForcedBatch(_) => EventKind::ForcedBatch,
            Self::SequencedBatches(_) => EventKind::SequencedBatches,
            Self::VerifiedBatch(_) => EventKind::VerifiedBatch,
            Self::SequencedForceBatches(_) => EventKind::SequencedForceBatches,
        }
    }
}

/// The kind tag for a [`RollupEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A global exit root update.
    GlobalExitRoot,
    /// A forced batch.
    ForcedBatch,
    /// A sequenced batches submission.
    SequencedBatches,
    /// A verified batch.
    VerifiedBatch,
    /// A sequenced forced batches submission.
    SequencedForceBatches,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_exit_root_combines_roots() {
        let mainnet = B256::repeat_byte(0x11);
        let rollup = B256::repeat_byte(0x22);
        let ger = GlobalExitRoot::new(42, mainnet, rollup);

        let mut preimage = Vec::with_capacity(64);
        preimage.extend_from_slice(mainnet.as_slice());
        preimage.extend_from_slice(rollup.as_slice());

        assert_eq!(ger.block_number, 42);
        assert_eq!(ger.global_exit_root, keccak256(&preimage));
        // the combination is not symmetric.
        assert_ne!(
            ger.global_exit_root,
            GlobalExitRoot::new(42, rollup, mainnet).global_exit_root
        );
    }
}
