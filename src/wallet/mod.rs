//! Wallet keys
//!
//! This module handles mnemonic phrases and key derivation.
//! The private key NEVER leaves this module.

mod mnemonic;
mod signer;

pub use mnemonic::MnemonicPhrase;
pub use signer::SigningIdentity;
