//! Configuration for the storage wallet

pub mod rpc;

use crate::contract::{parse_contract_address, STORAGE_CONTRACT_ADDRESS};
use crate::{Error, Result};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Re-export RPC config
pub use rpc::RpcConfig;

/// Word counts a generated mnemonic may have
pub const ALLOWED_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Supported test networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Sepolia,
    Holesky,
}

impl Network {
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Sepolia => rpc::chains::SEPOLIA,
            Network::Holesky => rpc::chains::HOLESKY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Sepolia => "sepolia",
            Network::Holesky => "holesky",
        }
    }

    /// Parse a network name as typed on the command line
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "sepolia" => Ok(Network::Sepolia),
            "holesky" => Ok(Network::Holesky),
            _ => Err(Error::InvalidArgument(format!("Unknown network: {}", name))),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Test network the session connects to
    #[serde(default)]
    pub network: Network,
    /// Address of the storage contract
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    /// Number of words in generated mnemonic phrases
    #[serde(default = "default_word_count")]
    pub word_count: usize,
}

fn default_contract_address() -> String {
    STORAGE_CONTRACT_ADDRESS.to_string()
}

fn default_word_count() -> usize {
    12
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::default(),
            contract_address: default_contract_address(),
            word_count: default_word_count(),
        }
    }
}

impl Config {
    /// Load a JSON config file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the contract address and word count
    pub fn validate(&self) -> Result<()> {
        self.contract()?;
        if !ALLOWED_WORD_COUNTS.contains(&self.word_count) {
            return Err(Error::Config(format!(
                "word_count {} is not one of {:?}",
                self.word_count, ALLOWED_WORD_COUNTS
            )));
        }
        Ok(())
    }

    /// The parsed contract address
    pub fn contract(&self) -> Result<Address> {
        parse_contract_address(&self.contract_address)
    }
}
