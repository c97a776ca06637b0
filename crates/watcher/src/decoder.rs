use crate::error::{DecodeError, ScannerResult};

use alloy_primitives::{TxHash, B256};
use alloy_rpc_types_eth::{Log, Transaction, TransactionTrait};
use alloy_sol_types::SolEvent;
use lru::LruCache;
use std::{
    collections::{BTreeMap, HashMap},
    num::NonZeroUsize,
};
use tokio_util::sync::CancellationToken;
use zkrollup_contracts::abi::{
    calls::{try_decode_force_batch_call, try_decode_sequence_batches_call},
    logs::{
        try_decode_log, ForceBatch, SequenceBatches, SequenceForceBatches, UpdateGlobalExitRoot,
        VerifyBatches,
    },
};
use zkrollup_primitives::{
    ForcedBatch, GlobalExitRoot, RollupEvent, SequencedBatch, SequencedForceBatch, VerifiedBatch,
};
use zkrollup_providers::{retry_transient, Header, L1Rpc};

/// The capacity for the transaction cache.
const TRANSACTION_CACHE_CAPACITY: NonZeroUsize =
    NonZeroUsize::new(100).expect("non zero capacity");

/// A decoded rollup event along with the metadata of its emitting block and
/// log.
#[derive(Debug, Clone)]
pub(crate) struct DecodedEvent {
    /// The number of the emitting block.
    pub(crate) block_number: u64,
    /// The hash of the emitting block.
    pub(crate) block_hash: B256,
    /// The parent hash of the emitting block.
    pub(crate) parent_hash: B256,
    /// The timestamp of the emitting block.
    pub(crate) timestamp: u64,
    /// The index of the log within the emitting block.
    pub(crate) log_index: u64,
    /// The decoded event.
    pub(crate) event: RollupEvent,
}

/// Decodes raw L1 logs into rollup events.
///
/// One decoder lives for the duration of a scan. It carries a transaction
/// cache, a per-scan header cache and the index of forced batches observed so
/// far, consumed when correlating force sequencing submissions.
pub(crate) struct EventDecoder<'a, P> {
    rpc: &'a P,
    token: &'a CancellationToken,
    transactions: LruCache<TxHash, Transaction>,
    headers: HashMap<u64, Header>,
    forced: BTreeMap<u64, ForcedBatch>,
}

impl<'a, P: L1Rpc> EventDecoder<'a, P> {
    /// Returns a new [`EventDecoder`] over the provided RPC.
    pub(crate) fn new(rpc: &'a P, token: &'a CancellationToken) -> Self {
        Self {
            rpc,
            token,
            transactions: LruCache::new(TRANSACTION_CACHE_CAPACITY),
            headers: HashMap::new(),
            forced: BTreeMap::new(),
        }
    }

    /// Decodes the provided log, fetching the emitting block and transaction
    /// from the RPC as needed.
    pub(crate) async fn decode(&mut self, log: &Log) -> ScannerResult<DecodedEvent> {
        let block_number = log.block_number.ok_or(DecodeError::MissingBlockNumber)?;
        let block_hash = log.block_hash.ok_or(DecodeError::MissingBlockHash)?;
        let log_index = log.log_index.ok_or(DecodeError::MissingLogIndex)?;

        let header = self.header(block_number).await?;
        let timestamp = header.timestamp;
        let parent_hash = header.parent_hash;

        let topic = log.topic0().copied();
        let event = if topic == Some(UpdateGlobalExitRoot::SIGNATURE_HASH) {
            self.decode_global_exit_root(log, block_number)?
        } else if topic == Some(ForceBatch::SIGNATURE_HASH) {
            self.decode_forced_batch(log, block_number, timestamp).await?
        } else if topic == Some(SequenceBatches::SIGNATURE_HASH) {
            self.decode_sequenced_batches(log).await?
        } else if topic == Some(VerifyBatches::SIGNATURE_HASH) {
            self.decode_verified_batch(log, block_number)?
        } else if topic == Some(SequenceForceBatches::SIGNATURE_HASH) {
            self.decode_sequenced_force_batches(log, timestamp).await?
        } else {
            return Err(DecodeError::UnexpectedTopic(topic).into());
        };

        Ok(DecodedEvent { block_number, block_hash, parent_hash, timestamp, log_index, event })
    }

    fn decode_global_exit_root(&self, log: &Log, block_number: u64) -> ScannerResult<RollupEvent> {
        let decoded = try_decode_log::<UpdateGlobalExitRoot>(&log.inner)
            .ok_or(DecodeError::LogDecode("UpdateGlobalExitRoot"))?;

        Ok(RollupEvent::GlobalExitRoot(GlobalExitRoot::new(
            block_number,
            decoded.mainnetExitRoot,
            decoded.rollupExitRoot,
        )))
    }

    /// Decodes a forced batch, recovering the raw transactions from the
    /// forcing transaction's calldata. The event's own `transactions` field is
    /// never used, as it is empty for contract senders.
    async fn decode_forced_batch(
        &mut self,
        log: &Log,
        block_number: u64,
        forced_at: u64,
    ) -> ScannerResult<RollupEvent> {
        let decoded =
            try_decode_log::<ForceBatch>(&log.inner).ok_or(DecodeError::LogDecode("ForceBatch"))?;
        let tx_hash = log.transaction_hash.ok_or(DecodeError::MissingTransactionHash)?;
        let tx = self.transaction(tx_hash).await?;
        let call = try_decode_force_batch_call(tx.input())
            .ok_or(DecodeError::CalldataMismatch(tx_hash))?;

        let forced = ForcedBatch {
            block_number,
            forced_batch_number: decoded.forceBatchNum,
            sequencer: decoded.sequencer,
            global_exit_root: decoded.lastGlobalExitRoot,
            raw_txs_data: call.transactions,
            forced_at,
        };
        self.forced.insert(forced.forced_batch_number, forced.clone());

        Ok(RollupEvent::ForcedBatch(forced))
    }

    /// Decodes a sequencing submission, recovering the per-batch payloads
    /// from the sequencing transaction's calldata. The event only announces
    /// the last batch number, so batch numbers are assigned backwards from it.
    async fn decode_sequenced_batches(&mut self, log: &Log) -> ScannerResult<RollupEvent> {
        let decoded = try_decode_log::<SequenceBatches>(&log.inner)
            .ok_or(DecodeError::LogDecode("SequenceBatches"))?;
        let tx_hash = log.transaction_hash.ok_or(DecodeError::MissingTransactionHash)?;
        let tx = self.transaction(tx_hash).await?;
        let call = try_decode_sequence_batches_call(tx.input())
            .ok_or(DecodeError::CalldataMismatch(tx_hash))?;

        let batches = call.batches;
        if batches.is_empty() {
            return Err(DecodeError::EmptySequence(tx_hash).into());
        }

        let last = decoded.numBatch;
        let count = batches.len();
        let first = last
            .checked_sub(count as u64 - 1)
            .ok_or(DecodeError::BatchCountOverflow { last, count })?;

        let coinbase = tx.inner.signer();
        let nonce = tx.nonce();
        let sequenced = batches
            .into_iter()
            .enumerate()
            .map(|(i, batch)| SequencedBatch {
                batch_number: first + i as u64,
                coinbase,
                tx_hash,
                nonce,
                global_exit_root: batch.globalExitRoot,
                timestamp: batch.timestamp,
                min_forced_timestamp: batch.minForcedTimestamp,
                transactions: batch.transactions,
            })
            .collect();

        Ok(RollupEvent::SequencedBatches(sequenced))
    }

    fn decode_verified_batch(&self, log: &Log, block_number: u64) -> ScannerResult<RollupEvent> {
        let decoded = try_decode_log::<VerifyBatches>(&log.inner)
            .ok_or(DecodeError::LogDecode("VerifyBatches"))?;
        let tx_hash = log.transaction_hash.ok_or(DecodeError::MissingTransactionHash)?;

        Ok(RollupEvent::VerifiedBatch(VerifiedBatch {
            block_number,
            batch_number: decoded.numBatch,
            aggregator: decoded.aggregator,
            state_root: decoded.stateRoot,
            tx_hash,
        }))
    }

    /// Decodes a force sequencing submission, correlating each batch number
    /// in the announced range with the pending forced batches, consumed in
    /// increasing forced batch number order.
    async fn decode_sequenced_force_batches(
        &mut self,
        log: &Log,
        timestamp: u64,
    ) -> ScannerResult<RollupEvent> {
        let decoded = try_decode_log::<SequenceForceBatches>(&log.inner)
            .ok_or(DecodeError::LogDecode("SequenceForceBatches"))?;
        let tx_hash = log.transaction_hash.ok_or(DecodeError::MissingTransactionHash)?;
        let tx = self.transaction(tx_hash).await?;

        let first = decoded.firstBatchSequenced;
        let last = decoded.lastBatchSequenced;
        if first > last {
            return Err(DecodeError::InvalidBatchRange { first, last }.into());
        }
        // bound the announced range before reserving anything: a range wider
        // than the pending index can never correlate, and `last - first` can
        // be close to `u64::MAX` for corrupt logs.
        if last - first >= self.forced.len() as u64 {
            return Err(DecodeError::MissingForcedBatches { first, last }.into());
        }

        let coinbase = tx.inner.signer();
        let nonce = tx.nonce();
        let mut sequenced = Vec::with_capacity((last - first + 1) as usize);
        for batch_number in first..=last {
            let (_, forced) = self
                .forced
                .pop_first()
                .ok_or(DecodeError::MissingForcedBatches { first, last })?;
            sequenced.push(SequencedForceBatch {
                batch_number,
                coinbase,
                tx_hash,
                nonce,
                timestamp,
                global_exit_root: forced.global_exit_root,
                min_forced_timestamp: forced.forced_at,
                transactions: forced.raw_txs_data,
            });
        }

        Ok(RollupEvent::SequencedForceBatches(sequenced))
    }

    async fn header(&mut self, number: u64) -> ScannerResult<Header> {
        if let Some(header) = self.headers.get(&number) {
            return Ok(header.clone());
        }

        let rpc = self.rpc;
        let block = retry_transient(self.token, || rpc.block_by_number(number.into()))
            .await?
            .ok_or(DecodeError::UnknownBlock(number))?;
        self.headers.insert(number, block.header.clone());

        Ok(block.header)
    }

    async fn transaction(&mut self, hash: TxHash) -> ScannerResult<Transaction> {
        if let Some(tx) = self.transactions.get(&hash) {
            return Ok(tx.clone());
        }

        let rpc = self.rpc;
        let tx = retry_transient(self.token, || rpc.transaction_by_hash(hash))
            .await?
            .ok_or(DecodeError::UnknownTransaction(hash))?;
        self.transactions.put(hash, tx.clone());

        Ok(tx)
    }
}
