//! HTTP gas price services used as secondary oracle sources.

use crate::{error::GasOracleError, GasPricer};

use serde::Deserialize;

/// A gas pricer backed by an Etherscan-style gas tracker API.
#[derive(Debug, Clone)]
pub struct EtherscanGasPricer {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl EtherscanGasPricer {
    /// Returns a new [`EtherscanGasPricer`] for the provided API URL and
    /// optional API key.
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self { client: reqwest::Client::new(), url: url.into(), api_key }
    }
}

#[async_trait::async_trait]
impl GasPricer for EtherscanGasPricer {
    fn name(&self) -> &'static str {
        "etherscan"
    }

    async fn gas_price(&self) -> Result<u128, GasOracleError> {
        let mut request = self
            .client
            .get(&self.url)
            .query(&[("module", "gastracker"), ("action", "gasoracle")]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("apikey", key.as_str())]);
        }

        let response: EtherscanResponse =
            request.send().await?.error_for_status()?.json().await?;
        gwei_to_wei(&response.result.fast_gas_price)
    }
}

#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    result: EtherscanResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EtherscanResult {
    fast_gas_price: String,
}

/// A gas pricer backed by a gas-station-style API reporting prices in tenths
/// of gwei.
#[derive(Debug, Clone)]
pub struct GasStationGasPricer {
    client: reqwest::Client,
    url: String,
}

impl GasStationGasPricer {
    /// Returns a new [`GasStationGasPricer`] for the provided API URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), url: url.into() }
    }
}

#[async_trait::async_trait]
impl GasPricer for GasStationGasPricer {
    fn name(&self) -> &'static str {
        "gas-station"
    }

    async fn gas_price(&self) -> Result<u128, GasOracleError> {
        let response: GasStationResponse =
            self.client.get(&self.url).send().await?.error_for_status()?.json().await?;
        // the fast price is reported in tenths of gwei.
        Ok((response.fast * 1e8) as u128)
    }
}

#[derive(Debug, Deserialize)]
struct GasStationResponse {
    fast: f64,
}

/// Converts a decimal gwei string into wei.
fn gwei_to_wei(price: &str) -> Result<u128, GasOracleError> {
    let gwei: f64 = price.parse().map_err(|_| GasOracleError::InvalidPrice(price.into()))?;
    if !gwei.is_finite() || gwei < 0. {
        return Err(GasOracleError::InvalidPrice(price.into()));
    }
    Ok((gwei * 1e9) as u128)
}
