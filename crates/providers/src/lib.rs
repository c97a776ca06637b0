//! The L1 RPC abstraction used across the zk-rollup bridge, along with the
//! cancellation and bounded-retry helpers shared by all RPC-bound components.

pub use error::L1RpcError;
mod error;

pub use retry::{retry_transient, with_cancellation, RETRY_BACKOFF, TRANSIENT_RETRIES};
mod retry;

pub use rpc::{Block, Header, L1Rpc, OnlineL1Rpc, RpcResult};
mod rpc;

#[cfg(any(test, feature = "test-utils"))]
/// Common test helpers.
pub mod test_utils;
