use alloy_sol_types::{sol, SolCall};

sol! {
    /// The per-batch payload embedded in a `sequenceBatches` submission.
    #[derive(Debug, PartialEq, Eq)]
    struct BatchData {
        bytes transactions;
        bytes32 globalExitRoot;
        uint64 timestamp;
        uint64 minForcedTimestamp;
    }

    /// A call forcing a batch on the rollup contract.
    #[derive(Debug)]
    function forceBatch(bytes transactions, uint256 maticAmount) external;

    /// A call sequencing a set of batches on the rollup contract.
    #[derive(Debug)]
    function sequenceBatches(BatchData[] batches) external;
}

/// Tries to decode the provided calldata into a [`forceBatchCall`].
pub fn try_decode_force_batch_call(calldata: &[u8]) -> Option<forceBatchCall> {
    match calldata.get(0..4).map(|sel| sel.try_into().expect("correct slice length")) {
        Some(forceBatchCall::SELECTOR) => forceBatchCall::abi_decode(calldata).ok(),
        Some(_) | None => None,
    }
}

/// Tries to decode the provided calldata into a [`sequenceBatchesCall`].
pub fn try_decode_sequence_batches_call(calldata: &[u8]) -> Option<sequenceBatchesCall> {
    match calldata.get(0..4).map(|sel| sel.try_into().expect("correct slice length")) {
        Some(sequenceBatchesCall::SELECTOR) => sequenceBatchesCall::abi_decode(calldata).ok(),
        Some(_) | None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Bytes, B256, U256};
    use alloy_sol_types::SolCall;

    #[test]
    fn test_force_batch_call_roundtrip() {
        let call = forceBatchCall {
            transactions: Bytes::from_static(b"raw l2 transactions"),
            maticAmount: U256::from(1_000_000u64),
        };
        let calldata = call.abi_encode();

        let decoded = try_decode_force_batch_call(&calldata).expect("valid calldata");
        assert_eq!(decoded.transactions, call.transactions);
        assert_eq!(decoded.maticAmount, call.maticAmount);
    }

    #[test]
    fn test_sequence_batches_call_roundtrip() {
        let call = sequenceBatchesCall {
            batches: vec![BatchData {
                transactions: Bytes::from_static(b"batch payload"),
                globalExitRoot: B256::repeat_byte(0xab),
                timestamp: 1_700_000_000,
                minForcedTimestamp: 0,
            }],
        };
        let calldata = call.abi_encode();

        let decoded = try_decode_sequence_batches_call(&calldata).expect("valid calldata");
        assert_eq!(decoded.batches, call.batches);
    }

    #[test]
    fn test_rejects_unknown_selector() {
        assert!(try_decode_force_batch_call(&[0xde, 0xad, 0xbe, 0xef]).is_none());
        assert!(try_decode_sequence_batches_call(&[]).is_none());
    }
}
