//! Scripted mocks shared by the bridge test suites.

use crate::rpc::{Block, L1Rpc, RpcResult};

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{keccak256, Address, Bytes, TxHash};
use alloy_rpc_types_eth::{Filter, Log, Transaction, TransactionRequest};
use parking_lot::Mutex;
use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc,
    },
};

/// Returns an arbitrary instance of the passed type.
#[macro_export]
macro_rules! random {
    ($typ: ty) => {{
        let mut bytes = Box::new([0u8; size_of::<$typ>()]);
        let mut rng = ::rand::rng();
        ::rand::RngCore::fill_bytes(&mut rng, bytes.as_mut_slice());
        let mut u = ::arbitrary::Unstructured::new(bytes.as_slice());
        <$typ>::arbitrary(&mut u).unwrap()
    }};
}

/// A scripted implementation of the [`L1Rpc`] trait.
///
/// Cloning shares the underlying script and recordings, so one handle can be
/// given to the component under test while another drives assertions.
#[derive(Debug, Clone, Default)]
pub struct MockRpc {
    inner: Arc<MockRpcInner>,
}

#[derive(Debug, Default)]
struct MockRpcInner {
    blocks: Mutex<HashMap<u64, Block>>,
    transactions: Mutex<HashMap<TxHash, Transaction>>,
    log_responses: Mutex<VecDeque<RpcResult<Vec<Log>>>>,
    filters: Mutex<Vec<Filter>>,
    gas_prices: Mutex<VecDeque<RpcResult<u128>>>,
    nonces: Mutex<HashMap<Address, u64>>,
    sent_transactions: Mutex<Vec<Bytes>>,
    chain_id: AtomicU64,
    gas_estimate: AtomicU64,
    requests: AtomicUsize,
}

impl MockRpc {
    /// Returns a new empty [`MockRpc`] with chain id 1337.
    pub fn new() -> Self {
        let mock = Self::default();
        mock.inner.chain_id.store(1337, Ordering::SeqCst);
        mock.inner.gas_estimate.store(1_000_000, Ordering::SeqCst);
        mock
    }

    /// Registers a block, keyed by its number.
    pub fn with_block(self, block: Block) -> Self {
        self.inner.blocks.lock().insert(block.header.number, block);
        self
    }

    /// Registers a transaction, keyed by its hash.
    pub fn with_transaction(self, tx: Transaction) -> Self {
        self.inner.transactions.lock().insert(*tx.inner.tx_hash(), tx);
        self
    }

    /// Appends a scripted response for the next `logs` query.
    pub fn with_log_response(self, response: RpcResult<Vec<Log>>) -> Self {
        self.inner.log_responses.lock().push_back(response);
        self
    }

    /// Appends a scripted response for the next `suggest_gas_price` query.
    pub fn with_gas_price(self, response: RpcResult<u128>) -> Self {
        self.inner.gas_prices.lock().push_back(response);
        self
    }

    /// Registers the latest nonce for the provided address.
    pub fn with_nonce(self, address: Address, nonce: u64) -> Self {
        self.inner.nonces.lock().insert(address, nonce);
        self
    }

    /// Returns the filters of all `logs` queries issued so far.
    pub fn recorded_filters(&self) -> Vec<Filter> {
        self.inner.filters.lock().clone()
    }

    /// Returns the raw transactions submitted so far.
    pub fn sent_transactions(&self) -> Vec<Bytes> {
        self.inner.sent_transactions.lock().clone()
    }

    /// Returns the total number of RPC requests issued so far.
    pub fn request_count(&self) -> usize {
        self.inner.requests.load(Ordering::SeqCst)
    }

    fn record_request(&self) {
        self.inner.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl L1Rpc for MockRpc {
    async fn block_by_number(&self, number: BlockNumberOrTag) -> RpcResult<Option<Block>> {
        self.record_request();
        let blocks = self.inner.blocks.lock();
        match number {
            BlockNumberOrTag::Number(number) => Ok(blocks.get(&number).cloned()),
            BlockNumberOrTag::Latest => {
                Ok(blocks.values().max_by_key(|block| block.header.number).cloned())
            }
            _ => unimplemented!("can only query by number or latest"),
        }
    }

    async fn logs(&self, filter: &Filter) -> RpcResult<Vec<Log>> {
        self.record_request();
        self.inner.filters.lock().push(filter.clone());
        self.inner.log_responses.lock().pop_front().unwrap_or_else(|| Ok(vec![]))
    }

    async fn transaction_by_hash(&self, hash: TxHash) -> RpcResult<Option<Transaction>> {
        self.record_request();
        Ok(self.inner.transactions.lock().get(&hash).cloned())
    }

    async fn transaction_count(&self, address: Address) -> RpcResult<u64> {
        self.record_request();
        Ok(self.inner.nonces.lock().get(&address).copied().unwrap_or_default())
    }

    async fn chain_id(&self) -> RpcResult<u64> {
        self.record_request();
        Ok(self.inner.chain_id.load(Ordering::SeqCst))
    }

    async fn estimate_gas(&self, _request: TransactionRequest) -> RpcResult<u64> {
        self.record_request();
        Ok(self.inner.gas_estimate.load(Ordering::SeqCst))
    }

    async fn suggest_gas_price(&self) -> RpcResult<u128> {
        self.record_request();
        self.inner.gas_prices.lock().pop_front().expect("no scripted gas price")
    }

    async fn send_raw_transaction(&self, encoded: &[u8]) -> RpcResult<TxHash> {
        self.record_request();
        self.inner.sent_transactions.lock().push(Bytes::copy_from_slice(encoded));
        Ok(keccak256(encoded))
    }
}
