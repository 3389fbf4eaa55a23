//! Storage Wallet
//!
//! A testnet wallet session that:
//! - Generates or imports a BIP-39 signing identity
//! - Shows the identity's address and balance
//! - Calls `store(uint256)` and `retrieve()` on a fixed storage contract
//!
//! # Security Model
//!
//! - Private keys never leave the wallet module
//! - Mnemonic phrases are held as secrets and redacted from `Debug`
//! - Nothing is persisted; identities live only as long as the session

pub mod config;
pub mod contract;
pub mod network;
pub mod session;
pub mod units;
pub mod wallet;

mod error;

// Re-export commonly used types
pub use config::{Config, Network, RpcConfig};
pub use contract::{ContractBinding, STORAGE_CONTRACT_ADDRESS};
pub use error::{Error, Result};
pub use network::NetworkConnection;
pub use session::{
    BalanceQuery, BalanceReading, SessionState, TransactionHandle, TransactionStatus, WalletSession,
};
pub use units::Balance;
pub use wallet::{MnemonicPhrase, SigningIdentity};
