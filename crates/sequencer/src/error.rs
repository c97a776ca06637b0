use alloy_json_rpc::RpcError;
use alloy_network::{Ethereum, TransactionBuilderError};
use alloy_primitives::Address;
use alloy_transport::TransportErrorKind;
use zkrollup_gas_oracle::GasOracleError;
use zkrollup_providers::L1RpcError;

/// An error that occurred while submitting a sequencing transaction.
#[derive(Debug, thiserror::Error)]
pub enum SequencerError {
    /// No signer is registered for the requested address.
    #[error("no signer registered for address {0}")]
    SignerNotFound(Address),
    /// The submission carried no sequences.
    #[error("no sequences to submit")]
    NoSequences,
    /// An error at the RPC level.
    #[error("l1 rpc error: {0:?}")]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// The submission was cancelled by the caller.
    #[error("submission cancelled")]
    Cancelled,
    /// An error from the gas price oracle.
    #[error(transparent)]
    GasOracle(GasOracleError),
    /// The transaction could not be built and signed.
    #[error("failed to build transaction: {0}")]
    TransactionBuilder(#[from] TransactionBuilderError<Ethereum>),
}

impl From<L1RpcError> for SequencerError {
    fn from(err: L1RpcError) -> Self {
        match err {
            L1RpcError::Transport(err) => Self::Rpc(err),
            L1RpcError::Cancelled => Self::Cancelled,
        }
    }
}

impl From<GasOracleError> for SequencerError {
    fn from(err: GasOracleError) -> Self {
        match err {
            GasOracleError::Cancelled => Self::Cancelled,
            err => Self::GasOracle(err),
        }
    }
}
