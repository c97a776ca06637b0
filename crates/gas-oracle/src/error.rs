use alloy_json_rpc::RpcError;
use alloy_transport::TransportErrorKind;
use zkrollup_providers::L1RpcError;

/// An error that occurred while querying a gas price.
#[derive(Debug, thiserror::Error)]
pub enum GasOracleError {
    /// An error at the RPC level.
    #[error("l1 rpc error: {0:?}")]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// The query was cancelled by the caller.
    #[error("gas price query cancelled")]
    Cancelled,
    /// An error from a gas price HTTP service.
    #[error("gas price http error: {0}")]
    Http(#[from] reqwest::Error),
    /// A gas price service returned an unparseable price.
    #[error("invalid gas price {0:?}")]
    InvalidPrice(String),
}

impl From<L1RpcError> for GasOracleError {
    fn from(err: L1RpcError) -> Self {
        match err {
            L1RpcError::Transport(err) => Self::Rpc(err),
            L1RpcError::Cancelled => Self::Cancelled,
        }
    }
}
