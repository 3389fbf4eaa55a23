//! Connection to a test network node
//!
//! A `NetworkConnection` is a read-only provider. It is built once per session
//! and shared by balance queries and contract bindings; signing providers are
//! layered on top of it when a contract is bound.

use crate::config::{Network, RpcConfig};
use crate::{Error, Result};
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};

/// Read-only handle to one named network
#[derive(Clone)]
pub struct NetworkConnection {
    network: Network,
    provider: DynProvider,
}

impl NetworkConnection {
    /// Connect over HTTP using the endpoint configured for `network`
    pub fn connect(rpc_config: &RpcConfig, network: Network) -> Result<Self> {
        let rpc_url = rpc_config.get(network.chain_id()).ok_or_else(|| {
            Error::Config(format!("No RPC URL configured for {}", network))
        })?;

        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| Error::Config(format!("Invalid RPC URL: {}", e)))?;

        tracing::debug!(network = %network, host = ?url.host_str(), "Connecting to network");

        let provider = ProviderBuilder::default().connect_http(url).erased();
        Ok(Self::from_provider(network, provider))
    }

    /// Wrap an already-built provider
    pub fn from_provider(network: Network, provider: DynProvider) -> Self {
        Self { network, provider }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Raw balance of `address` in wei
    pub async fn get_balance(&self, address: Address) -> Result<U256> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| Error::NetworkUnavailable(format!("Failed to get balance: {}", e)))
    }
}

impl std::fmt::Debug for NetworkConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkConnection")
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloy::transports::mock::Asserter;
    use std::collections::HashMap;

    /// Connection backed by a mocked transport that answers from `asserter`
    pub(crate) fn mocked_connection() -> (NetworkConnection, Asserter) {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::default()
            .connect_mocked_client(asserter.clone())
            .erased();
        (
            NetworkConnection::from_provider(Network::Sepolia, provider),
            asserter,
        )
    }

    #[tokio::test]
    async fn test_get_balance() {
        let (connection, asserter) = mocked_connection();
        asserter.push_success(&U256::from(42u64));

        let balance = connection.get_balance(Address::ZERO).await.unwrap();
        assert_eq!(balance, U256::from(42u64));
    }

    #[tokio::test]
    async fn test_get_balance_failure_is_network_unavailable() {
        let (connection, asserter) = mocked_connection();
        asserter.push_failure_msg("connection refused");

        let err = connection.get_balance(Address::ZERO).await.unwrap_err();
        assert!(matches!(err, Error::NetworkUnavailable(_)));
    }

    #[test]
    fn test_connect_requires_configured_network() {
        let config = RpcConfig::with_urls(HashMap::new());
        let err = NetworkConnection::connect(&config, Network::Sepolia).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_connect_rejects_bad_url() {
        let mut urls = HashMap::new();
        urls.insert(Network::Holesky.chain_id(), "not a url".to_string());
        let config = RpcConfig::with_urls(urls);

        assert!(NetworkConnection::connect(&config, Network::Holesky).is_err());
    }
}
