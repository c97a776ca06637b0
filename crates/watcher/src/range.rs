use crate::error::ScannerResult;

use alloy_json_rpc::RpcError;
use alloy_rpc_types_eth::{Filter, Log};
use alloy_sol_types::SolEvent;
use alloy_transport::TransportErrorKind;
use std::collections::VecDeque;
use tokio_util::sync::CancellationToken;
use zkrollup_contracts::{
    abi::logs::{
        ForceBatch, SequenceBatches, SequenceForceBatches, UpdateGlobalExitRoot, VerifyBatches,
    },
    AddressBook,
};
use zkrollup_providers::{retry_transient, L1Rpc, L1RpcError};

/// The maximum number of times a rejected block range is halved before the
/// rejection is surfaced.
pub(crate) const MAX_RANGE_SPLITS: u32 = 10;

/// Lowercased message fragments providers use when rejecting a log query for
/// covering too many blocks or results.
const RANGE_TOO_LARGE_PATTERNS: &[&str] =
    &["block range", "returned more than", "too many results", "response size"];

/// Returns the log filter covering the rollup contracts and event signatures
/// for the provided inclusive block range.
pub(crate) fn event_filter(address_book: &AddressBook, from: u64, to: u64) -> Filter {
    Filter::new()
        .address(vec![address_book.rollup, address_book.global_exit_root])
        .event_signature(vec![
            UpdateGlobalExitRoot::SIGNATURE_HASH,
            ForceBatch::SIGNATURE_HASH,
            SequenceBatches::SIGNATURE_HASH,
            VerifyBatches::SIGNATURE_HASH,
            SequenceForceBatches::SIGNATURE_HASH,
        ])
        .from_block(from)
        .to_block(to)
}

/// Splits the inclusive block range into chunks of at most `max_block_range`
/// blocks. A zero chunk size is treated as one block per chunk.
pub(crate) fn chunk_range(from: u64, to: u64, max_block_range: u64) -> Vec<(u64, u64)> {
    let max_block_range = max_block_range.max(1);

    let mut chunks = Vec::new();
    let mut start = from;
    while start <= to {
        let end = to.min(start.saturating_add(max_block_range - 1));
        chunks.push((start, end));
        let Some(next) = end.checked_add(1) else { break };
        start = next;
    }
    chunks
}

/// Fetches all logs for the rollup contracts in the inclusive block range,
/// chunking queries to `max_block_range` blocks.
///
/// Ranges the provider rejects for being too large are halved and requeued at
/// the front of the worklist, preserving ascending block order in the output.
pub(crate) async fn fetch_logs<P: L1Rpc>(
    rpc: &P,
    address_book: &AddressBook,
    token: &CancellationToken,
    from: u64,
    to: u64,
    max_block_range: u64,
) -> ScannerResult<Vec<Log>> {
    let mut worklist: VecDeque<(u64, u64, u32)> =
        chunk_range(from, to, max_block_range).into_iter().map(|(f, t)| (f, t, 0)).collect();
    let mut logs = Vec::new();

    while let Some((from, to, splits)) = worklist.pop_front() {
        let filter = event_filter(address_book, from, to);
        match retry_transient(token, || rpc.logs(&filter)).await {
            Ok(chunk) => logs.extend(chunk),
            Err(L1RpcError::Transport(err))
                if from < to && splits < MAX_RANGE_SPLITS && is_range_too_large(&err) =>
            {
                let mid = from + (to - from) / 2;
                tracing::debug!(target: "zkrollup::watcher", from, to, mid, "provider rejected block range, splitting");
                worklist.push_front((mid + 1, to, splits + 1));
                worklist.push_front((from, mid, splits + 1));
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(logs)
}

/// Returns true if the error response indicates the queried block range
/// exceeds a provider limit.
fn is_range_too_large(err: &RpcError<TransportErrorKind>) -> bool {
    let RpcError::ErrorResp(payload) = err else { return false };
    let message = payload.message.to_lowercase();
    RANGE_TOO_LARGE_PATTERNS.iter().any(|pattern| message.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_cover_range() {
        assert_eq!(chunk_range(0, 25, 10), vec![(0, 9), (10, 19), (20, 25)]);
        assert_eq!(chunk_range(5, 5, 10), vec![(5, 5)]);
        assert_eq!(chunk_range(0, 9, 10), vec![(0, 9)]);
    }

    #[test]
    fn test_zero_chunk_size_falls_back_to_single_blocks() {
        assert_eq!(chunk_range(0, 2, 0), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_chunks_saturate_at_max_block() {
        assert_eq!(chunk_range(u64::MAX - 1, u64::MAX, 10), vec![(u64::MAX - 1, u64::MAX)]);
    }

    #[test]
    fn test_detects_range_rejections() {
        let resp = |message: &str| {
            RpcError::<TransportErrorKind>::ErrorResp(alloy_json_rpc::ErrorPayload {
                code: -32005,
                message: message.to_string().into(),
                data: None,
            })
        };

        assert!(is_range_too_large(&resp("query returned more than 10000 results")));
        assert!(is_range_too_large(&resp("Block range is too large")));
        assert!(!is_range_too_large(&resp("execution reverted")));
        assert!(!is_range_too_large(&TransportErrorKind::custom_str("connection reset")));
    }
}
