//! Submission of batch sequencing transactions to the L1 rollup contract.

pub use error::SequencerError;
mod error;

pub use metrics::SequencerMetrics;
mod metrics;

pub use registry::AuthRegistry;
mod registry;

use alloy_eips::eip2718::Encodable2718;
use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, TxHash};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::SolCall;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use zkrollup_contracts::abi::calls::{sequenceBatchesCall, BatchData};
use zkrollup_gas_oracle::GasPriceOracle;
use zkrollup_primitives::Sequence;
use zkrollup_providers::{retry_transient, with_cancellation, L1Rpc};

/// The transaction sequencer signs and submits batch sequencing transactions
/// to the rollup contract.
#[derive(Debug)]
pub struct TransactionSequencer<P> {
    /// The L1 RPC.
    rpc: P,
    /// The registry of authorized signers.
    registry: Arc<AuthRegistry>,
    /// The gas price oracle.
    gas_oracle: GasPriceOracle<P>,
    /// The address of the rollup contract.
    rollup_address: Address,
    /// The metrics for the sequencer.
    metrics: SequencerMetrics,
}

impl<P> TransactionSequencer<P> {
    /// Returns a new [`TransactionSequencer`] submitting to the provided
    /// rollup contract.
    pub fn new(
        rpc: P,
        registry: Arc<AuthRegistry>,
        gas_oracle: GasPriceOracle<P>,
        rollup_address: Address,
    ) -> Self {
        Self { rpc, registry, gas_oracle, rollup_address, metrics: SequencerMetrics::default() }
    }

    /// Returns the registry of authorized signers.
    pub fn registry(&self) -> &Arc<AuthRegistry> {
        &self.registry
    }
}

impl<P: L1Rpc> TransactionSequencer<P> {
    /// Signs and submits a `sequenceBatches` transaction packing the provided
    /// sequences, returning the transaction hash without awaiting inclusion.
    ///
    /// The signer is resolved before any network traffic, so an unknown
    /// signer fails without touching the RPC. The submission itself is never
    /// retried, avoiding accidental double submissions.
    pub async fn sequence_batches(
        &self,
        signer: Address,
        sequences: &[Sequence],
        token: &CancellationToken,
    ) -> Result<TxHash, SequencerError> {
        if sequences.is_empty() {
            return Err(SequencerError::NoSequences);
        }
        let signer = self.registry.signer(signer).ok_or(SequencerError::SignerNotFound(signer))?;
        let from = signer.address();

        let gas_price = self.gas_oracle.l1_gas_price(token).await?;

        let batches = sequences
            .iter()
            .map(|sequence| BatchData {
                transactions: sequence.encoded_transactions(),
                globalExitRoot: sequence.global_exit_root,
                timestamp: sequence.timestamp,
                // only set by the contract when sequencing forced batches.
                minForcedTimestamp: 0,
            })
            .collect();
        let calldata = sequenceBatchesCall { batches }.abi_encode();

        let nonce = retry_transient(token, || self.rpc.transaction_count(from)).await?;
        let chain_id = retry_transient(token, || self.rpc.chain_id()).await?;

        let mut request = TransactionRequest::default()
            .with_from(from)
            .with_to(self.rollup_address)
            .with_nonce(nonce)
            .with_chain_id(chain_id)
            .with_gas_price(gas_price)
            .with_input(calldata);
        let gas_limit = retry_transient(token, || self.rpc.estimate_gas(request.clone())).await?;
        request = request.with_gas_limit(gas_limit);

        let wallet = EthereumWallet::from(signer);
        let envelope = request.build(&wallet).await?;
        let hash =
            with_cancellation(token, self.rpc.send_raw_transaction(&envelope.encoded_2718()))
                .await?;

        self.metrics.submissions.increment(1);
        self.metrics.sequenced_batches.increment(sequences.len() as u64);
        tracing::info!(
            target: "zkrollup::sequencer",
            %from,
            %hash,
            batches = sequences.len(),
            nonce,
            gas_price,
            "submitted sequencing transaction"
        );

        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy_consensus::{Transaction, TxEnvelope};
    use alloy_eips::eip2718::Decodable2718;
    use alloy_primitives::{keccak256, Bytes, B256};
    use alloy_signer_local::PrivateKeySigner;
    use zkrollup_providers::test_utils::MockRpc;

    const ROLLUP_ADDRESS: Address = Address::repeat_byte(0x42);

    fn sequencer(rpc: MockRpc, registry: Arc<AuthRegistry>) -> TransactionSequencer<MockRpc> {
        let gas_oracle = GasPriceOracle::new(rpc.clone());
        TransactionSequencer::new(rpc, registry, gas_oracle, ROLLUP_ADDRESS)
    }

    fn sequences() -> Vec<Sequence> {
        vec![
            Sequence {
                global_exit_root: B256::repeat_byte(0x01),
                timestamp: 1_700_000_000,
                transactions: vec![
                    Bytes::from_static(b"first raw tx"),
                    Bytes::from_static(b"second raw tx"),
                ],
            },
            Sequence {
                global_exit_root: B256::repeat_byte(0x02),
                timestamp: 1_700_000_010,
                transactions: vec![Bytes::from_static(b"third raw tx")],
            },
        ]
    }

    #[tokio::test]
    async fn test_should_reject_unknown_signer_without_rpc_traffic() {
        // Given
        let rpc = MockRpc::new();
        let sequencer = sequencer(rpc.clone(), Arc::new(AuthRegistry::new()));
        let unknown = Address::repeat_byte(0x99);

        // When
        let result =
            sequencer.sequence_batches(unknown, &sequences(), &CancellationToken::new()).await;

        // Then
        assert!(matches!(result, Err(SequencerError::SignerNotFound(address)) if address == unknown));
        assert_eq!(rpc.request_count(), 0);
    }

    #[tokio::test]
    async fn test_should_reject_empty_submission() {
        // Given
        let rpc = MockRpc::new();
        let registry = Arc::new(AuthRegistry::new());
        let signer = PrivateKeySigner::random();
        let address = signer.address();
        registry.add_or_replace_signer(signer);
        let sequencer = sequencer(rpc.clone(), registry);

        // When
        let result = sequencer.sequence_batches(address, &[], &CancellationToken::new()).await;

        // Then
        assert!(matches!(result, Err(SequencerError::NoSequences)));
        assert_eq!(rpc.request_count(), 0);
    }

    #[tokio::test]
    async fn test_should_submit_signed_sequencing_transaction() -> eyre::Result<()> {
        // Given
        let registry = Arc::new(AuthRegistry::new());
        let signer = PrivateKeySigner::random();
        let address = signer.address();
        registry.add_or_replace_signer(signer);

        let rpc = MockRpc::new().with_nonce(address, 4).with_gas_price(Ok(1_000));
        let sequencer = sequencer(rpc.clone(), registry);
        let sequences = sequences();

        // When
        let hash =
            sequencer.sequence_batches(address, &sequences, &CancellationToken::new()).await?;

        // Then
        let sent = rpc.sent_transactions();
        assert_eq!(sent.len(), 1);
        assert_eq!(hash, keccak256(&sent[0]));

        let envelope = TxEnvelope::decode_2718(&mut sent[0].as_ref())?;
        assert_eq!(envelope.nonce(), 4);
        assert_eq!(envelope.chain_id(), Some(1337));
        assert_eq!(envelope.gas_price(), Some(1_000));
        assert_eq!(envelope.to(), Some(ROLLUP_ADDRESS));

        let call = sequenceBatchesCall::abi_decode(envelope.input())?;
        assert_eq!(call.batches.len(), 2);
        assert_eq!(call.batches[0].transactions, sequences[0].encoded_transactions());
        assert_eq!(call.batches[0].globalExitRoot, B256::repeat_byte(0x01));
        assert_eq!(call.batches[0].timestamp, 1_700_000_000);
        assert_eq!(call.batches[0].minForcedTimestamp, 0);
        assert_eq!(call.batches[1].transactions, sequences[1].encoded_transactions());

        Ok(())
    }

    #[tokio::test]
    async fn test_should_concatenate_sequence_transactions() {
        // Given
        let sequence = &sequences()[0];

        // When
        let encoded = sequence.encoded_transactions();

        // Then
        assert_eq!(encoded, Bytes::from_static(b"first raw txsecond raw tx"));
    }

    #[tokio::test]
    async fn test_should_abort_submission_on_cancellation() {
        // Given
        let registry = Arc::new(AuthRegistry::new());
        let signer = PrivateKeySigner::random();
        let address = signer.address();
        registry.add_or_replace_signer(signer);

        let rpc = MockRpc::new();
        let sequencer = sequencer(rpc.clone(), registry);
        let token = CancellationToken::new();
        token.cancel();

        // When
        let result = sequencer.sequence_batches(address, &sequences(), &token).await;

        // Then
        assert!(matches!(result, Err(SequencerError::Cancelled)));
        assert!(rpc.sent_transactions().is_empty());
    }
}
