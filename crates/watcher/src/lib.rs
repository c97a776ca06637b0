//! L1 observation for the zk-rollup bridge: scans block ranges for rollup
//! contract events and groups them into ordered per-block snapshots.

mod assembler;
use assembler::BlockAssembler;

mod decoder;
use decoder::EventDecoder;

pub use error::{DecodeError, ScannerError};
mod error;

pub use metrics::ScannerMetrics;
mod metrics;

mod range;

use std::time::Instant;
use tokio_util::sync::CancellationToken;
use zkrollup_contracts::AddressBook;
use zkrollup_primitives::{Block, Order};
use zkrollup_providers::L1Rpc;

/// The default log query block range.
pub const DEFAULT_MAX_BLOCK_RANGE: u64 = 10_000;

/// The configuration for the [`RollupScanner`].
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// The L1 addresses of the rollup contracts.
    pub address_book: AddressBook,
    /// The maximum block range per log query.
    pub max_block_range: u64,
}

impl ScannerConfig {
    /// Returns a new [`ScannerConfig`] for the provided address book, with
    /// the default log query block range.
    pub const fn new(address_book: AddressBook) -> Self {
        Self { address_book, max_block_range: DEFAULT_MAX_BLOCK_RANGE }
    }

    /// Sets the maximum block range per log query, clamped to at least one
    /// block.
    pub const fn with_max_block_range(mut self, max_block_range: u64) -> Self {
        self.max_block_range = if max_block_range == 0 { 1 } else { max_block_range };
        self
    }
}

/// The rollup scanner reads the L1 logs of the rollup contracts and decodes
/// them into per-block rollup events.
#[derive(Debug)]
pub struct RollupScanner<P> {
    /// The L1 RPC.
    rpc: P,
    /// The scanner configuration.
    config: ScannerConfig,
    /// The metrics for the scanner.
    metrics: ScannerMetrics,
}

impl<P> RollupScanner<P> {
    /// Returns a new [`RollupScanner`] over the provided RPC.
    pub fn new(rpc: P, config: ScannerConfig) -> Self {
        Self { rpc, config, metrics: ScannerMetrics::default() }
    }
}

impl<P: L1Rpc> RollupScanner<P> {
    /// Scans the inclusive block range, returning every block holding rollup
    /// events along with the cross-kind event order for each block hash.
    ///
    /// The scan is all or nothing: any RPC failure, decode failure or
    /// cancellation discards all partial progress.
    pub async fn scan(
        &self,
        from: u64,
        to: u64,
        token: &CancellationToken,
    ) -> Result<(Vec<Block>, Order), ScannerError> {
        if from > to {
            return Err(ScannerError::InvalidRange { from, to });
        }

        let start = Instant::now();
        let logs = range::fetch_logs(
            &self.rpc,
            &self.config.address_book,
            token,
            from,
            to,
            self.config.max_block_range,
        )
        .await?;
        tracing::debug!(target: "zkrollup::watcher", from, to, count = logs.len(), "fetched logs");

        let mut decoder = EventDecoder::new(&self.rpc, token);
        let mut assembler = BlockAssembler::default();
        for log in &logs {
            let event = decoder.decode(log).await?;
            self.metrics.process_event(&event.event);
            assembler.push(event)?;
        }

        let (blocks, order) = assembler.finish();
        self.metrics.scan_duration.record(start.elapsed().as_secs_f64());
        tracing::info!(target: "zkrollup::watcher", from, to, blocks = blocks.len(), "scan complete");

        Ok((blocks, order))
    }
}
