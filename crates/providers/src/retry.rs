use crate::{error::L1RpcError, rpc::RpcResult};

use alloy_json_rpc::RpcError;
use alloy_transport::TransportErrorKind;
use std::{future::Future, time::Duration};
use tokio_util::sync::CancellationToken;

/// The maximum number of attempts for a transiently failing RPC operation.
pub const TRANSIENT_RETRIES: u32 = 3;

/// The base backoff between retry attempts, scaled linearly per attempt.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(200);

/// Races the provided RPC future against the cancellation token, surfacing
/// [`L1RpcError::Cancelled`] if the token fires first.
pub async fn with_cancellation<T>(
    token: &CancellationToken,
    fut: impl Future<Output = RpcResult<T>>,
) -> Result<T, L1RpcError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(L1RpcError::Cancelled),
        res = fut => res.map_err(Into::into),
    }
}

/// Runs the provided RPC operation, retrying transport-level failures up to
/// [`TRANSIENT_RETRIES`] times with linear backoff.
///
/// RPC error responses are never retried; cancellation aborts immediately.
pub async fn retry_transient<T, F, Fut>(
    token: &CancellationToken,
    mut operation: F,
) -> Result<T, L1RpcError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RpcResult<T>>,
{
    let mut attempt = 1;
    loop {
        match with_cancellation(token, operation()).await {
            Err(L1RpcError::Transport(err)) if is_transient(&err) && attempt < TRANSIENT_RETRIES => {
                tracing::debug!(target: "zkrollup::providers", ?err, attempt, "transient rpc failure, retrying");
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(L1RpcError::Cancelled),
                    _ = tokio::time::sleep(RETRY_BACKOFF * attempt) => {}
                }
                attempt += 1;
            }
            res => return res,
        }
    }
}

/// Returns true for transport-level failures worth retrying, as opposed to
/// RPC error responses which are deterministic.
const fn is_transient(err: &RpcError<TransportErrorKind>) -> bool {
    matches!(err, RpcError::Transport(_))
}
