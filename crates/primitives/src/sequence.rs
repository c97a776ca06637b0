use alloy_primitives::{Bytes, B256};

/// A batch of raw L2 transactions to be sequenced on L1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The global exit root for the batch.
    pub global_exit_root: B256,
    /// The batch timestamp.
    pub timestamp: u64,
    /// The raw L2 transactions to pack in the batch.
    pub transactions: Vec<Bytes>,
}

impl Sequence {
    /// Concatenates the raw transactions into the single byte payload
    /// submitted on L1.
    pub fn encoded_transactions(&self) -> Bytes {
        let mut data = Vec::with_capacity(self.transactions.iter().map(|tx| tx.len()).sum());
        for tx in &self.transactions {
            data.extend_from_slice(tx);
        }
        data.into()
    }
}
