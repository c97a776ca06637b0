use alloy_json_rpc::RpcError;
use alloy_transport::TransportErrorKind;

/// An error that occurred during an L1 RPC bound operation.
#[derive(Debug, thiserror::Error)]
pub enum L1RpcError {
    /// An error at the RPC transport level.
    #[error("l1 rpc error: {0:?}")]
    Transport(#[from] RpcError<TransportErrorKind>),
    /// The operation was cancelled by the caller.
    #[error("operation cancelled")]
    Cancelled,
}

impl L1RpcError {
    /// Returns true if the error was caused by caller cancellation.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
