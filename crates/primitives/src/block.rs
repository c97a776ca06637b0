use crate::{ForcedBatch, GlobalExitRoot, SequencedBatch, SequencedForceBatch, VerifiedBatch};

use alloy_primitives::B256;

/// An L1 block along with all rollup events observed in it.
///
/// Events are grouped per kind, each vector preserving discovery order. The
/// sequenced collections are vectors of vectors: one inner vector per
/// submission transaction, preserving the order batches were packed within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The L1 block number.
    pub number: u64,
    /// The L1 block hash.
    pub hash: B256,
    /// The hash of the parent block.
    pub parent_hash: B256,
    /// The L1 block timestamp.
    pub timestamp: u64,
    /// The global exit root updates observed in the block.
    pub global_exit_roots: Vec<GlobalExitRoot>,
    /// The forced batches observed in the block.
    pub forced_batches: Vec<ForcedBatch>,
    /// The sequenced batches observed in the block, one inner vector per
    /// sequencing transaction.
    pub sequenced_batches: Vec<Vec<SequencedBatch>>,
    /// The verified batches observed in the block.
    pub verified_batches: Vec<VerifiedBatch>,
    /// The sequenced forced batches observed in the block, one inner vector
    /// per sequencing transaction.
    pub sequenced_force_batches: Vec<Vec<SequencedForceBatch>>,
}

impl Block {
    /// Returns a new empty [`Block`] for the provided header data.
    pub const fn new(number: u64, hash: B256, parent_hash: B256, timestamp: u64) -> Self {
        Self {
            number,
            hash,
            parent_hash,
            timestamp,
            global_exit_roots: Vec::new(),
            forced_batches: Vec::new(),
            sequenced_batches: Vec::new(),
            verified_batches: Vec::new(),
            sequenced_force_batches: Vec::new(),
        }
    }
}
