//! Multi-source L1 gas price oracle for the zk-rollup bridge.
//!
//! The oracle combines the price suggested by the L1 node with any number of
//! secondary HTTP services and suggests the maximum of all successful
//! sources, so the submitted price errs on the side of fast inclusion.

pub use error::GasOracleError;
mod error;

pub use metrics::OracleMetrics;
mod metrics;

pub use services::{EtherscanGasPricer, GasStationGasPricer};
mod services;

use std::{fmt, sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;
use zkrollup_providers::{retry_transient, L1Rpc};

/// The default timeout for a secondary gas price query.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// A secondary gas price source.
#[async_trait::async_trait]
pub trait GasPricer: Send + Sync {
    /// The name of the source, used in logs.
    fn name(&self) -> &'static str;

    /// Returns the suggested gas price in wei.
    async fn gas_price(&self) -> Result<u128, GasOracleError>;
}

/// The gas price oracle combines the L1 node suggestion with secondary
/// services.
///
/// The node is the only mandatory source: its failure fails the query, while
/// secondary failures, timeouts and panics only narrow the candidate set.
pub struct GasPriceOracle<P> {
    /// The L1 RPC.
    rpc: P,
    /// The secondary gas price services.
    secondaries: Vec<Arc<dyn GasPricer>>,
    /// The timeout applied to each secondary query.
    query_timeout: Duration,
    /// The metrics for the oracle.
    metrics: OracleMetrics,
}

impl<P: fmt::Debug> fmt::Debug for GasPriceOracle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GasPriceOracle")
            .field("rpc", &self.rpc)
            .field("secondaries", &self.secondaries.len())
            .field("query_timeout", &self.query_timeout)
            .finish_non_exhaustive()
    }
}

impl<P> GasPriceOracle<P> {
    /// Returns a new [`GasPriceOracle`] over the provided RPC, without
    /// secondary services.
    pub fn new(rpc: P) -> Self {
        Self {
            rpc,
            secondaries: Vec::new(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            metrics: OracleMetrics::default(),
        }
    }

    /// Adds a secondary gas price service.
    pub fn with_service(mut self, service: Arc<dyn GasPricer>) -> Self {
        self.secondaries.push(service);
        self
    }

    /// Sets the timeout applied to each secondary query.
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }
}

impl<P: L1Rpc> GasPriceOracle<P> {
    /// Returns the suggested L1 gas price in wei: the maximum over the node
    /// suggestion and all secondary services that answered in time.
    pub async fn l1_gas_price(&self, token: &CancellationToken) -> Result<u128, GasOracleError> {
        let primary = retry_transient(token, || self.rpc.suggest_gas_price()).await?;

        let handles: Vec<_> = self
            .secondaries
            .iter()
            .map(|service| {
                let service = service.clone();
                let timeout = self.query_timeout;
                let name = service.name();
                (name, tokio::spawn(async move { tokio::time::timeout(timeout, service.gas_price()).await }))
            })
            .collect();

        let mut price = primary;
        for (name, handle) in handles {
            let joined = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(GasOracleError::Cancelled),
                joined = handle => joined,
            };
            match joined {
                Ok(Ok(Ok(suggested))) => {
                    tracing::trace!(target: "zkrollup::gas_oracle", name, suggested, "secondary gas price");
                    price = price.max(suggested);
                }
                Ok(Ok(Err(err))) => {
                    self.metrics.secondary_failures.increment(1);
                    tracing::warn!(target: "zkrollup::gas_oracle", name, ?err, "secondary gas price query failed");
                }
                Ok(Err(_)) => {
                    self.metrics.secondary_failures.increment(1);
                    tracing::warn!(target: "zkrollup::gas_oracle", name, "secondary gas price query timed out");
                }
                Err(err) => {
                    self.metrics.secondary_failures.increment(1);
                    tracing::error!(target: "zkrollup::gas_oracle", name, ?err, "secondary gas price task failed");
                }
            }
        }

        self.metrics.queries.increment(1);
        self.metrics.gas_price.record(price as f64);
        tracing::debug!(target: "zkrollup::gas_oracle", primary, price, "suggesting l1 gas price");

        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy_json_rpc::{ErrorPayload, RpcError};
    use zkrollup_providers::test_utils::MockRpc;

    struct StaticPricer(u128);

    #[async_trait::async_trait]
    impl GasPricer for StaticPricer {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn gas_price(&self) -> Result<u128, GasOracleError> {
            Ok(self.0)
        }
    }

    struct FailingPricer;

    #[async_trait::async_trait]
    impl GasPricer for FailingPricer {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn gas_price(&self) -> Result<u128, GasOracleError> {
            Err(GasOracleError::InvalidPrice("nope".into()))
        }
    }

    struct PanickingPricer;

    #[async_trait::async_trait]
    impl GasPricer for PanickingPricer {
        fn name(&self) -> &'static str {
            "panicking"
        }

        async fn gas_price(&self) -> Result<u128, GasOracleError> {
            panic!("service bug")
        }
    }

    struct StalledPricer;

    #[async_trait::async_trait]
    impl GasPricer for StalledPricer {
        fn name(&self) -> &'static str {
            "stalled"
        }

        async fn gas_price(&self) -> Result<u128, GasOracleError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_should_suggest_max_of_successful_sources() -> eyre::Result<()> {
        // Given
        let rpc = MockRpc::new().with_gas_price(Ok(765_625_001));
        let oracle = GasPriceOracle::new(rpc)
            .with_service(Arc::new(FailingPricer))
            .with_service(Arc::new(StaticPricer(765_625_003)))
            .with_service(Arc::new(StaticPricer(765_625_002)));

        // When
        let price = oracle.l1_gas_price(&CancellationToken::new()).await?;

        // Then
        assert_eq!(price, 765_625_003);
        Ok(())
    }

    #[tokio::test]
    async fn test_should_keep_primary_when_highest() -> eyre::Result<()> {
        // Given
        let rpc = MockRpc::new().with_gas_price(Ok(300));
        let oracle = GasPriceOracle::new(rpc).with_service(Arc::new(StaticPricer(100)));

        // When
        let price = oracle.l1_gas_price(&CancellationToken::new()).await?;

        // Then
        assert_eq!(price, 300);
        Ok(())
    }

    #[tokio::test]
    async fn test_should_swallow_secondary_failures() -> eyre::Result<()> {
        // Given
        let rpc = MockRpc::new().with_gas_price(Ok(50));
        let oracle = GasPriceOracle::new(rpc).with_service(Arc::new(FailingPricer));

        // When
        let price = oracle.l1_gas_price(&CancellationToken::new()).await?;

        // Then
        assert_eq!(price, 50);
        Ok(())
    }

    #[tokio::test]
    async fn test_should_fail_on_primary_failure() {
        // Given
        let rpc = MockRpc::new().with_gas_price(Err(RpcError::ErrorResp(ErrorPayload {
            code: -32000,
            message: "the method eth_gasPrice is not available".into(),
            data: None,
        })));
        let oracle = GasPriceOracle::new(rpc).with_service(Arc::new(StaticPricer(100)));

        // When
        let result = oracle.l1_gas_price(&CancellationToken::new()).await;

        // Then
        assert!(matches!(result, Err(GasOracleError::Rpc(RpcError::ErrorResp(_)))));
    }

    #[tokio::test]
    async fn test_should_isolate_panicking_secondary() -> eyre::Result<()> {
        // Given
        let rpc = MockRpc::new().with_gas_price(Ok(200));
        let oracle = GasPriceOracle::new(rpc)
            .with_service(Arc::new(PanickingPricer))
            .with_service(Arc::new(StaticPricer(150)));

        // When
        let price = oracle.l1_gas_price(&CancellationToken::new()).await?;

        // Then
        assert_eq!(price, 200);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_should_time_out_stalled_secondary() -> eyre::Result<()> {
        // Given
        let rpc = MockRpc::new().with_gas_price(Ok(400));
        let oracle = GasPriceOracle::new(rpc)
            .with_query_timeout(Duration::from_millis(100))
            .with_service(Arc::new(StalledPricer));

        // When
        let price = oracle.l1_gas_price(&CancellationToken::new()).await?;

        // Then
        assert_eq!(price, 400);
        Ok(())
    }

    #[tokio::test]
    async fn test_should_abort_on_cancellation() {
        // Given
        let rpc = MockRpc::new();
        let oracle = GasPriceOracle::new(rpc);
        let token = CancellationToken::new();
        token.cancel();

        // When
        let result = oracle.l1_gas_price(&token).await;

        // Then
        assert!(matches!(result, Err(GasOracleError::Cancelled)));
    }
}
