//! BIP-39 mnemonic phrases
//!
//! Phrases are checked against the English wordlist (word count, unknown
//! words, checksum) before any key is derived from them. The phrase text is
//! held in a [`SecretString`] and never appears in `Debug` output.

use crate::config::ALLOWED_WORD_COUNTS;
use crate::{Error, Result};
use bip39::{Language, Mnemonic};
use secrecy::{ExposeSecret, SecretString};

/// A validated BIP-39 English mnemonic phrase
pub struct MnemonicPhrase {
    phrase: SecretString,
    word_count: usize,
}

impl MnemonicPhrase {
    /// Generate a new random phrase with the given number of words
    pub fn generate(word_count: usize) -> Result<Self> {
        if !ALLOWED_WORD_COUNTS.contains(&word_count) {
            return Err(Error::InvalidArgument(format!(
                "Invalid word count: {} (must be 12, 15, 18, 21, or 24)",
                word_count
            )));
        }

        let mnemonic = Mnemonic::generate(word_count)
            .map_err(|e| Error::Wallet(format!("Mnemonic generation failed: {}", e)))?;

        Ok(Self::from_mnemonic(mnemonic))
    }

    /// Parse user input into a phrase
    ///
    /// Whitespace between words is normalized, so multi-line or padded input
    /// yields the same phrase as its single-spaced form.
    pub fn parse(input: &str) -> Result<Self> {
        let mnemonic = Mnemonic::parse_in(Language::English, input)
            .map_err(|e| Error::InvalidMnemonic(describe(e)))?;

        Ok(Self::from_mnemonic(mnemonic))
    }

    fn from_mnemonic(mnemonic: Mnemonic) -> Self {
        let word_count = mnemonic.word_count();
        Self {
            phrase: SecretString::from(mnemonic.to_string()),
            word_count,
        }
    }

    /// The canonical single-spaced phrase
    ///
    /// Callers should only expose this for backup display.
    pub fn expose(&self) -> &str {
        self.phrase.expose_secret()
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

impl std::fmt::Debug for MnemonicPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MnemonicPhrase")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

fn describe(err: bip39::Error) -> String {
    match err {
        bip39::Error::BadWordCount(count) => format!(
            "expected 12, 15, 18, 21 or 24 words, got {}",
            count
        ),
        bip39::Error::UnknownWord(index) => {
            format!("word {} is not in the English wordlist", index + 1)
        }
        bip39::Error::InvalidChecksum => "checksum does not match".to_string(),
        other => other.to_string(),
    }
}
