//! RPC endpoint configuration
//!
//! Endpoints are resolved per test network, following Ethereum ecosystem conventions:
//! 1. Per-network env vars (SEPOLIA_RPC_URL, HOLESKY_RPC_URL) - highest priority
//! 2. Provider API keys (ALCHEMY_API_KEY, INFURA_API_KEY) - builds URLs automatically
//! 3. Public RPC fallbacks - rate limited
//!
//! # Examples
//!
//! ```bash
//! # Option 1: Per-network URLs
//! export SEPOLIA_RPC_URL="https://eth-sepolia.g.alchemy.com/v2/YOUR_KEY"
//!
//! # Option 2: Single provider API key
//! export ALCHEMY_API_KEY="YOUR_KEY"
//!
//! # Option 3: No env vars - uses public RPCs (rate limited)
//! ```

use std::collections::HashMap;

/// RPC configuration for the supported test networks
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// RPC URLs indexed by chain ID
    urls: HashMap<u64, String>,
}

/// Chain ID constants
pub mod chains {
    pub const SEPOLIA: u64 = 11_155_111;
    pub const HOLESKY: u64 = 17_000;
}

/// Environment variable names
mod env_vars {
    // Per-network URLs (highest priority)
    pub const SEPOLIA_RPC_URL: &str = "SEPOLIA_RPC_URL";
    pub const HOLESKY_RPC_URL: &str = "HOLESKY_RPC_URL";

    // Provider API keys
    pub const ALCHEMY_API_KEY: &str = "ALCHEMY_API_KEY";
    pub const INFURA_API_KEY: &str = "INFURA_API_KEY";
}

/// Public RPC endpoints (rate limited)
mod public_rpcs {
    pub const SEPOLIA: &str = "https://ethereum-sepolia-rpc.publicnode.com";
    pub const HOLESKY: &str = "https://ethereum-holesky-rpc.publicnode.com";
}

impl RpcConfig {
    /// Create RPC config from environment variables
    ///
    /// Priority:
    /// 1. Per-network env vars (SEPOLIA_RPC_URL, HOLESKY_RPC_URL)
    /// 2. ALCHEMY_API_KEY - builds URLs for both networks
    /// 3. INFURA_API_KEY - builds URLs for both networks
    /// 4. Public RPC fallbacks
    pub fn from_env() -> Self {
        let mut urls = HashMap::new();

        if let Ok(url) = std::env::var(env_vars::SEPOLIA_RPC_URL) {
            tracing::debug!("Using SEPOLIA_RPC_URL for Sepolia");
            urls.insert(chains::SEPOLIA, url);
        }
        if let Ok(url) = std::env::var(env_vars::HOLESKY_RPC_URL) {
            tracing::debug!("Using HOLESKY_RPC_URL for Holesky");
            urls.insert(chains::HOLESKY, url);
        }

        if urls.is_empty() {
            if let Ok(key) = std::env::var(env_vars::ALCHEMY_API_KEY) {
                tracing::info!("Building RPC URLs from ALCHEMY_API_KEY");
                urls.insert(
                    chains::SEPOLIA,
                    format!("https://eth-sepolia.g.alchemy.com/v2/{}", key),
                );
                urls.insert(
                    chains::HOLESKY,
                    format!("https://eth-holesky.g.alchemy.com/v2/{}", key),
                );
            }
        }

        if urls.is_empty() {
            if let Ok(key) = std::env::var(env_vars::INFURA_API_KEY) {
                tracing::info!("Building RPC URLs from INFURA_API_KEY");
                urls.insert(
                    chains::SEPOLIA,
                    format!("https://sepolia.infura.io/v3/{}", key),
                );
                urls.insert(
                    chains::HOLESKY,
                    format!("https://holesky.infura.io/v3/{}", key),
                );
            }
        }

        if !urls.contains_key(&chains::SEPOLIA) {
            tracing::warn!("No RPC configured for Sepolia, using public RPC (rate limited)");
        }
        urls.entry(chains::SEPOLIA)
            .or_insert_with(|| public_rpcs::SEPOLIA.to_string());
        urls.entry(chains::HOLESKY)
            .or_insert_with(|| public_rpcs::HOLESKY.to_string());

        Self { urls }
    }

    /// Create with explicit RPC URLs
    pub fn with_urls(urls: HashMap<u64, String>) -> Self {
        Self { urls }
    }

    /// Get RPC URL for a chain
    pub fn get(&self, chain_id: u64) -> Option<&str> {
        self.urls.get(&chain_id).map(|s| s.as_str())
    }

    /// Check if a chain is configured
    pub fn has_chain(&self, chain_id: u64) -> bool {
        self.urls.contains_key(&chain_id)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
