//! Error types for the storage wallet

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("Transaction submission failed: {0}")]
    Submission(String),

    #[error("Contract query failed: {0}")]
    Query(String),

    #[error("No signing identity in this session")]
    NoIdentity,

    #[error("Contract binding belongs to a replaced identity")]
    StaleBinding,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
