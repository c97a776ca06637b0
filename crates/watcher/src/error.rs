use alloy_json_rpc::RpcError;
use alloy_primitives::{TxHash, B256};
use alloy_transport::TransportErrorKind;
use zkrollup_providers::L1RpcError;

/// A [`Result`] that uses [`ScannerError`] as the error type.
pub(crate) type ScannerResult<T> = Result<T, ScannerError>;

/// An error that occurred while scanning an L1 block range.
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    /// An error at the RPC level.
    #[error("l1 rpc error: {0:?}")]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// The scan was cancelled by the caller.
    #[error("scan cancelled")]
    Cancelled,
    /// A log failed to decode into a rollup event.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The provider returned a log out of on-chain order.
    #[error("log at block {block_number} arrived after block {last_seen}")]
    OutOfOrderLog {
        /// The block number of the offending log.
        block_number: u64,
        /// The highest block number observed before the offending log.
        last_seen: u64,
    },
    /// The requested block range is inverted.
    #[error("invalid block range {from}..={to}")]
    InvalidRange {
        /// The start of the requested range.
        from: u64,
        /// The end of the requested range.
        to: u64,
    },
}

impl From<L1RpcError> for ScannerError {
    fn from(err: L1RpcError) -> Self {
        match err {
            L1RpcError::Transport(err) => Self::Rpc(err),
            L1RpcError::Cancelled => Self::Cancelled,
        }
    }
}

/// An error that occurred while decoding a log into a rollup event.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The log is missing a block number.
    #[error("missing block number for log")]
    MissingBlockNumber,
    /// The log is missing a block hash.
    #[error("missing block hash for log")]
    MissingBlockHash,
    /// The log is missing a log index.
    #[error("missing log index for log")]
    MissingLogIndex,
    /// The log is missing a transaction hash.
    #[error("missing transaction hash for log")]
    MissingTransactionHash,
    /// The log carries a topic the scanner did not subscribe to.
    #[error("unexpected log topic {0:?}")]
    UnexpectedTopic(Option<B256>),
    /// The emitting block is not known to the provider.
    #[error("unknown block {0}")]
    UnknownBlock(u64),
    /// The emitting transaction is not known to the provider.
    #[error("unknown transaction {0}")]
    UnknownTransaction(TxHash),
    /// The log payload does not match the event ABI.
    #[error("failed to decode log into {0}")]
    LogDecode(&'static str),
    /// The transaction calldata does not match the expected contract call.
    #[error("calldata of transaction {0} does not match the expected call")]
    CalldataMismatch(TxHash),
    /// A sequencing transaction carried no batches.
    #[error("sequencing transaction {0} contains no batches")]
    EmptySequence(TxHash),
    /// A sequencing submission packs more batches than its last batch number
    /// allows.
    #[error("batch count {count} exceeds last batch number {last}")]
    BatchCountOverflow {
        /// The last batch number announced by the event.
        last: u64,
        /// The number of batches packed in the calldata.
        count: usize,
    },
    /// A force sequencing event announced an inverted batch range.
    #[error("inverted forced batch range {first}..={last}")]
    InvalidBatchRange {
        /// The first batch number of the range.
        first: u64,
        /// The last batch number of the range.
        last: u64,
    },
    /// A force sequencing event could not be correlated with enough
    /// previously observed forced batches.
    #[error("no forced batch available for sequencing range {first}..={last}")]
    MissingForcedBatches {
        /// The first batch number of the range.
        first: u64,
        /// The last batch number of the range.
        last: u64,
    },
}
