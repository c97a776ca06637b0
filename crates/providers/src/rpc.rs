use alloy_eips::BlockNumberOrTag;
use alloy_json_rpc::RpcError;
use alloy_network::Ethereum;
use alloy_primitives::{Address, TxHash};
use alloy_provider::{Network, Provider};
use alloy_rpc_types_eth::{Filter, Log, Transaction, TransactionRequest};
use alloy_transport::TransportErrorKind;

/// The Ethereum L1 block response.
pub type Block = <Ethereum as Network>::BlockResponse;

/// The Ethereum L1 header response.
pub type Header = <Ethereum as Network>::HeaderResponse;

/// A [`Result`] with the raw transport error type.
pub type RpcResult<T> = Result<T, RpcError<TransportErrorKind>>;

/// The L1 ledger RPC surface consumed by the bridge.
///
/// Production code uses [`OnlineL1Rpc`] over an [`alloy_provider::Provider`];
/// tests substitute a scripted mock. The provider backing the online
/// implementation should carry its own rate limiting, the bridge only layers
/// bounded transient retries on top (see [`crate::retry_transient`]).
#[async_trait::async_trait]
pub trait L1Rpc: Send + Sync {
    /// Returns the block for the provided number or tag.
    async fn block_by_number(&self, number: BlockNumberOrTag) -> RpcResult<Option<Block>>;

    /// Returns the logs matching the provided filter.
    async fn logs(&self, filter: &Filter) -> RpcResult<Vec<Log>>;

    /// Returns the transaction for the provided hash.
    async fn transaction_by_hash(&self, hash: TxHash) -> RpcResult<Option<Transaction>>;

    /// Returns the latest nonce for the provided address.
    async fn transaction_count(&self, address: Address) -> RpcResult<u64>;

    /// Returns the chain id of the L1.
    async fn chain_id(&self) -> RpcResult<u64>;

    /// Returns a gas estimate for the provided transaction request.
    async fn estimate_gas(&self, request: TransactionRequest) -> RpcResult<u64>;

    /// Returns the gas price suggested by the node.
    async fn suggest_gas_price(&self) -> RpcResult<u128>;

    /// Submits a raw signed transaction, returning its hash without awaiting
    /// inclusion.
    async fn send_raw_transaction(&self, encoded: &[u8]) -> RpcResult<TxHash>;
}

/// An implementation of [`L1Rpc`] backed by a live [`Provider`].
#[derive(Debug, Clone)]
pub struct OnlineL1Rpc<P> {
    provider: P,
}

impl<P> OnlineL1Rpc<P> {
    /// Returns a new [`OnlineL1Rpc`] over the provided provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl<P: Provider> L1Rpc for OnlineL1Rpc<P> {
    async fn block_by_number(&self, number: BlockNumberOrTag) -> RpcResult<Option<Block>> {
        self.provider.get_block(number.into()).await
    }

    async fn logs(&self, filter: &Filter) -> RpcResult<Vec<Log>> {
        self.provider.get_logs(filter).await
    }

    async fn transaction_by_hash(&self, hash: TxHash) -> RpcResult<Option<Transaction>> {
        self.provider.get_transaction_by_hash(hash).await
    }

    async fn transaction_count(&self, address: Address) -> RpcResult<u64> {
        self.provider.get_transaction_count(address).await
    }

    async fn chain_id(&self) -> RpcResult<u64> {
        self.provider.get_chain_id().await
    }

    async fn estimate_gas(&self, request: TransactionRequest) -> RpcResult<u64> {
        self.provider.estimate_gas(request).await
    }

    async fn suggest_gas_price(&self) -> RpcResult<u128> {
        self.provider.get_gas_price().await
    }

    async fn send_raw_transaction(&self, encoded: &[u8]) -> RpcResult<TxHash> {
        let pending = self.provider.send_raw_transaction(encoded).await?;
        Ok(*pending.tx_hash())
    }
}
