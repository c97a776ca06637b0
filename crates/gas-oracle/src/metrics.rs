use metrics::{Counter, Histogram};
use metrics_derive::Metrics;

/// The metrics for the [`super::GasPriceOracle`].
#[derive(Metrics)]
#[metrics(scope = "gas_price_oracle")]
pub struct OracleMetrics {
    /// A counter on the gas price queries served.
    pub queries: Counter,
    /// A counter on the failed secondary service queries.
    pub secondary_failures: Counter,
    /// A histogram of the suggested gas price in wei.
    pub gas_price: Histogram,
}
