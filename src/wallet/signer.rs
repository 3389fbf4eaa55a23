//! Signing identity
//!
//! SECURITY: the private key lives only inside alloy's `PrivateKeySigner`.
//! - Keys are never serialized
//! - Keys and mnemonic phrases are never logged
//! - Callers get the address and an `EthereumWallet` for signing, never the raw key

use super::MnemonicPhrase;
use crate::{Error, Result};
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};

/// A key pair derived from a mnemonic phrase
///
/// Derivation uses the standard Ethereum path `m/44'/60'/0'/0/0`, so an
/// imported phrase yields the same address other wallets show for it.
pub struct SigningIdentity {
    /// Public address (safe to expose)
    address: Address,
    /// Ethereum wallet for alloy integration
    wallet: EthereumWallet,
    /// Phrase the key was derived from
    phrase: MnemonicPhrase,
    /// Position of this identity in its session's replacement sequence
    generation: u64,
}

impl SigningIdentity {
    /// Create an identity from fresh random entropy
    pub fn random(word_count: usize, generation: u64) -> Result<Self> {
        let phrase = MnemonicPhrase::generate(word_count)?;
        Self::from_phrase(phrase, generation)
    }

    /// Derive the identity for a validated phrase
    pub fn from_phrase(phrase: MnemonicPhrase, generation: u64) -> Result<Self> {
        let signer: PrivateKeySigner = MnemonicBuilder::<English>::default()
            .phrase(phrase.expose())
            .build()
            .map_err(|e| Error::Wallet(format!("Key derivation failed: {}", e)))?;

        let address = signer.address();
        let wallet = EthereumWallet::from(signer);

        Ok(Self {
            address,
            wallet,
            phrase,
            generation,
        })
    }

    /// Get the public address (safe to share)
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the address as a checksummed string
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }

    /// Get a reference to the EthereumWallet for use with alloy providers
    ///
    /// EthereumWallet only exposes signing operations, not the raw private key.
    pub fn wallet(&self) -> &EthereumWallet {
        &self.wallet
    }

    /// The mnemonic phrase, for backup display
    pub fn phrase(&self) -> &MnemonicPhrase {
        &self.phrase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// Implement Debug manually to avoid exposing the signer
impl std::fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("address", &self.address)
            .field("generation", &self.generation)
            .field("signer", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known development phrase (DO NOT use with real funds!)
    const TEST_PHRASE: &str = "test test test test test test test test test test test junk";

    #[test]
    fn test_identity_from_phrase() {
        let phrase = MnemonicPhrase::parse(TEST_PHRASE).unwrap();
        let identity = SigningIdentity::from_phrase(phrase, 1).unwrap();

        assert_eq!(
            identity.address_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
        assert_eq!(identity.generation(), 1);
    }

    #[test]
    fn test_random_identities_differ() {
        let first = SigningIdentity::random(12, 1).unwrap();
        let second = SigningIdentity::random(12, 2).unwrap();

        assert_ne!(first.address(), second.address());
        assert_eq!(first.phrase().word_count(), 12);
    }

    #[test]
    fn test_random_identity_rederives_from_its_phrase() {
        let identity = SigningIdentity::random(24, 1).unwrap();
        let phrase = MnemonicPhrase::parse(identity.phrase().expose()).unwrap();
        let again = SigningIdentity::from_phrase(phrase, 2).unwrap();

        assert_eq!(identity.address(), again.address());
    }

    #[test]
    fn test_debug_redacts_key() {
        let phrase = MnemonicPhrase::parse(TEST_PHRASE).unwrap();
        let identity = SigningIdentity::from_phrase(phrase, 1).unwrap();

        let debug_str = format!("{:?}", identity);

        assert!(!debug_str.contains("junk"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
