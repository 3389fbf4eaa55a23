//! Wallet session
//!
//! `WalletSession` owns the active signing identity, the network connection
//! and the contract binding built for that identity. It exposes identity
//! creation/import, balance queries, and the contract's `store`/`retrieve`.
//!
//! Identity replacement is tracked with a generation counter:
//! - every successful create/import bumps the generation
//! - balance readings and contract bindings carry the generation they were issued for
//! - readings and bindings from an older generation are rejected instead of applied

use crate::config::{Config, RpcConfig};
use crate::contract::ContractBinding;
use crate::network::NetworkConnection;
use crate::units::Balance;
use crate::wallet::{MnemonicPhrase, SigningIdentity};
use crate::{Error, Result};
use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Default number of words for generated phrases
const DEFAULT_WORD_COUNT: usize = 12;

/// Where the session is in its identity/binding lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NoIdentity,
    IdentityReady,
    BoundReady,
}

/// A balance tagged with the identity it was queried for
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReading {
    pub address: Address,
    pub generation: u64,
    pub balance: Balance,
    pub fetched_at: DateTime<Utc>,
}

/// A submitted (not necessarily mined) `store` transaction
#[derive(Debug, Clone, Serialize)]
pub struct TransactionHandle {
    pub hash: TxHash,
    pub from: Address,
    pub contract: Address,
    pub value: U256,
    pub submitted_at: DateTime<Utc>,
}

/// On-chain state of a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum TransactionStatus {
    Pending,
    Confirmed { block_number: Option<u64> },
    Reverted { block_number: Option<u64> },
}

pub struct WalletSession {
    id: Uuid,
    network: NetworkConnection,
    contract: Address,
    word_count: usize,
    generation: u64,
    identity: Option<SigningIdentity>,
    binding: Option<ContractBinding>,
    displayed_balance: Option<Balance>,
}

impl WalletSession {
    /// Create a session with no identity
    pub fn new(network: NetworkConnection, contract: Address) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, network = %network.network(), contract = %contract, "Session started");

        Self {
            id,
            network,
            contract,
            word_count: DEFAULT_WORD_COUNT,
            generation: 0,
            identity: None,
            binding: None,
            displayed_balance: None,
        }
    }

    /// Build a session from validated configuration
    pub fn from_config(config: &Config, rpc_config: &RpcConfig) -> Result<Self> {
        config.validate()?;
        let network = NetworkConnection::connect(rpc_config, config.network)?;
        Ok(Self::new(network, config.contract()?).with_word_count(config.word_count))
    }

    /// Set the number of words used by [`WalletSession::create_identity`]
    pub fn with_word_count(mut self, word_count: usize) -> Self {
        self.word_count = word_count;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn network(&self) -> &NetworkConnection {
        &self.network
    }

    pub fn contract_address(&self) -> Address {
        self.contract
    }

    pub fn state(&self) -> SessionState {
        match (&self.identity, &self.binding) {
            (None, _) => SessionState::NoIdentity,
            (Some(_), None) => SessionState::IdentityReady,
            (Some(_), Some(_)) => SessionState::BoundReady,
        }
    }

    /// The active identity, if any
    pub fn identity(&self) -> Option<&SigningIdentity> {
        self.identity.as_ref()
    }

    /// The binding for the active identity, if one has been built
    pub fn binding(&self) -> Option<&ContractBinding> {
        self.binding.as_ref()
    }

    /// Last balance applied for the active identity
    pub fn displayed_balance(&self) -> Option<&Balance> {
        self.displayed_balance.as_ref()
    }

    /// Replace the active identity with one from fresh random entropy
    pub fn create_identity(&mut self) -> Result<&SigningIdentity> {
        let identity = SigningIdentity::random(self.word_count, self.generation + 1)?;
        Ok(self.replace_identity(identity))
    }

    /// Replace the active identity with one derived from `phrase`
    ///
    /// On failure the session is left exactly as it was.
    pub fn import_identity(&mut self, phrase: &str) -> Result<&SigningIdentity> {
        let phrase = MnemonicPhrase::parse(phrase).map_err(|e| {
            tracing::warn!(session = %self.id, error = %e, "Rejected mnemonic import");
            e
        })?;
        let identity = SigningIdentity::from_phrase(phrase, self.generation + 1)?;
        Ok(self.replace_identity(identity))
    }

    fn replace_identity(&mut self, identity: SigningIdentity) -> &SigningIdentity {
        self.generation = identity.generation();
        self.binding = None;
        self.displayed_balance = None;

        tracing::info!(
            session = %self.id,
            address = %identity.address(),
            generation = self.generation,
            "Signing identity replaced"
        );

        self.identity.insert(identity)
    }

    /// Query the network for the balance of `identity`
    ///
    /// The reading is returned, not applied; pass it to
    /// [`WalletSession::record_balance`] to display it.
    pub async fn query_balance(&self, identity: &SigningIdentity) -> Result<BalanceReading> {
        BalanceQuery::new(self.id, self.network.clone(), identity)
            .run()
            .await
    }

    /// A balance query for the active identity that does not borrow the session
    ///
    /// The identity may be replaced while the query is in flight; its reading
    /// is then rejected by [`WalletSession::record_balance`].
    pub fn balance_query(&self) -> Result<BalanceQuery> {
        let identity = self.identity.as_ref().ok_or(Error::NoIdentity)?;
        Ok(BalanceQuery::new(self.id, self.network.clone(), identity))
    }

    /// Apply a reading if it was issued for the active identity
    ///
    /// Returns `false` and leaves the displayed balance alone when the
    /// identity has been replaced since the query was issued.
    pub fn record_balance(&mut self, reading: BalanceReading) -> bool {
        let current = self
            .identity
            .as_ref()
            .map(|identity| (identity.generation(), identity.address()));

        if current != Some((reading.generation, reading.address)) {
            tracing::warn!(
                session = %self.id,
                address = %reading.address,
                generation = reading.generation,
                "Discarding balance for replaced identity"
            );
            return false;
        }

        self.displayed_balance = Some(reading.balance);
        true
    }

    /// Query and apply the balance of the active identity
    pub async fn refresh_balance(&mut self) -> Result<Balance> {
        let identity = self.identity.as_ref().ok_or(Error::NoIdentity)?;
        let reading = self.query_balance(identity).await?;
        let balance = reading.balance;
        // Issued for the active identity while `self` is held, so it always applies
        self.record_balance(reading);
        Ok(balance)
    }

    /// Bind the storage contract to the active identity
    ///
    /// The binding is kept as the session's current binding and a copy is
    /// returned. Binding again with the same identity yields an equivalent
    /// binding.
    pub fn bind_contract(&mut self) -> Result<ContractBinding> {
        let identity = self.identity.as_ref().ok_or(Error::NoIdentity)?;
        let binding = ContractBinding::new(self.contract, identity, &self.network);

        tracing::debug!(
            session = %self.id,
            contract = %self.contract,
            identity = %binding.identity_address(),
            "Contract bound"
        );

        self.binding = Some(binding.clone());
        Ok(binding)
    }

    fn check_binding(&self, binding: &ContractBinding) -> Result<()> {
        match &self.identity {
            Some(identity)
                if identity.generation() == binding.generation()
                    && identity.address() == binding.identity_address()
                    && binding.contract_address() == self.contract =>
            {
                Ok(())
            }
            _ => Err(Error::StaleBinding),
        }
    }

    /// Submit `store(value)` where `value` is raw user input
    ///
    /// Input is validated before anything is sent to the network.
    pub async fn store(&self, binding: &ContractBinding, value: &str) -> Result<TransactionHandle> {
        self.check_binding(binding)?;
        let value = parse_store_value(value)?;
        self.store_value(binding, value).await
    }

    /// Submit `store(value)` signed by the binding's identity
    pub async fn store_value(
        &self,
        binding: &ContractBinding,
        value: U256,
    ) -> Result<TransactionHandle> {
        self.check_binding(binding)?;
        let from = binding.identity_address();

        let pending = binding
            .writer()
            .store(value)
            .from(from)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(session = %self.id, error = %e, "Store submission failed");
                Error::Submission(e.to_string())
            })?;

        let handle = TransactionHandle {
            hash: *pending.tx_hash(),
            from,
            contract: binding.contract_address(),
            value,
            submitted_at: Utc::now(),
        };

        tracing::info!(
            session = %self.id,
            tx_hash = %handle.hash,
            value = %value,
            "Store transaction submitted"
        );

        Ok(handle)
    }

    /// Read the stored value with `retrieve()`
    pub async fn retrieve(&self, binding: &ContractBinding) -> Result<Balance> {
        self.check_binding(binding)?;

        let raw = binding
            .reader()
            .retrieve()
            .from(binding.identity_address())
            .call()
            .await
            .map_err(|e| {
                tracing::warn!(session = %self.id, error = %e, "Retrieve call failed");
                Error::Query(e.to_string())
            })?;

        tracing::debug!(session = %self.id, value = %raw, "Retrieved stored value");
        Ok(Balance::from_raw(raw))
    }

    /// Look up the receipt of a submitted transaction
    pub async fn transaction_status(&self, hash: TxHash) -> Result<TransactionStatus> {
        let receipt = self
            .network
            .provider()
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| Error::Query(format!("Failed to get receipt: {}", e)))?;

        Ok(match receipt {
            None => TransactionStatus::Pending,
            Some(receipt) if receipt.status() => TransactionStatus::Confirmed {
                block_number: receipt.block_number(),
            },
            Some(receipt) => TransactionStatus::Reverted {
                block_number: receipt.block_number(),
            },
        })
    }
}

/// Pending balance lookup tagged with the identity it was issued for
#[derive(Debug, Clone)]
pub struct BalanceQuery {
    session: Uuid,
    network: NetworkConnection,
    address: Address,
    generation: u64,
}

impl BalanceQuery {
    fn new(session: Uuid, network: NetworkConnection, identity: &SigningIdentity) -> Self {
        Self {
            session,
            network,
            address: identity.address(),
            generation: identity.generation(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fetch the balance from the network
    pub async fn run(self) -> Result<BalanceReading> {
        tracing::debug!(session = %self.session, address = %self.address, "Querying balance");

        let raw = self.network.get_balance(self.address).await.map_err(|e| {
            tracing::warn!(
                session = %self.session,
                address = %self.address,
                error = %e,
                "Balance query failed"
            );
            e
        })?;

        Ok(BalanceReading {
            address: self.address,
            generation: self.generation,
            balance: Balance::from_raw(raw),
            fetched_at: Utc::now(),
        })
    }
}

impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("id", &self.id)
            .field("network", &self.network.network())
            .field("contract", &self.contract)
            .field("generation", &self.generation)
            .field("identity", &self.identity)
            .field("state", &self.state())
            .finish()
    }
}

/// Parse raw input for `store(uint256)`
///
/// Accepts decimal or `0x`-prefixed hex, ignoring surrounding whitespace.
pub fn parse_store_value(input: &str) -> Result<U256> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(Error::Submission("store value is empty".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(Error::Submission(format!(
            "store value must not be negative: {}",
            trimmed
        )));
    }

    let (digits, radix) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix as u32)) {
        return Err(Error::Submission(format!(
            "store value is not a number: {}",
            trimmed
        )));
    }

    U256::from_str_radix(digits, radix).map_err(|e| {
        Error::Submission(format!("store value out of uint256 range: {} ({})", trimmed, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{parse_contract_address, STORAGE_CONTRACT_ADDRESS};
    use crate::network::tests::mocked_connection;
    use alloy::primitives::{Bytes, B256};
    use alloy::rpc::types::TransactionReceipt;
    use alloy::transports::mock::Asserter;
    use serde_json::json;

    const TEST_PHRASE: &str = "test test test test test test test test test test test junk";
    const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn session() -> (WalletSession, Asserter) {
        let (connection, asserter) = mocked_connection();
        let contract = parse_contract_address(STORAGE_CONTRACT_ADDRESS).unwrap();
        (WalletSession::new(connection, contract), asserter)
    }

    fn abi_word(value: U256) -> Bytes {
        Bytes::from(value.to_be_bytes::<32>().to_vec())
    }

    #[test]
    fn test_state_transitions() {
        let (mut session, _asserter) = session();
        assert_eq!(session.state(), SessionState::NoIdentity);

        session.create_identity().unwrap();
        assert_eq!(session.state(), SessionState::IdentityReady);

        session.bind_contract().unwrap();
        assert_eq!(session.state(), SessionState::BoundReady);

        session.create_identity().unwrap();
        assert_eq!(session.state(), SessionState::IdentityReady);
        assert!(session.binding().is_none());
    }

    #[test]
    fn test_bind_without_identity() {
        let (mut session, _asserter) = session();
        assert!(matches!(session.bind_contract(), Err(Error::NoIdentity)));
    }

    #[test]
    fn test_import_is_deterministic() {
        let (mut session, _asserter) = session();
        session.import_identity(TEST_PHRASE).unwrap();
        let binding = session.bind_contract().unwrap();

        assert_eq!(binding.identity_address().to_checksum(None), TEST_ADDRESS);
        assert_eq!(
            binding.contract_address().to_checksum(None),
            STORAGE_CONTRACT_ADDRESS
        );
    }

    #[test]
    fn test_failed_import_leaves_session_untouched() {
        let (mut session, _asserter) = session();
        assert!(matches!(
            session.import_identity("foo bar"),
            Err(Error::InvalidMnemonic(_))
        ));
        assert_eq!(session.state(), SessionState::NoIdentity);

        session.import_identity(TEST_PHRASE).unwrap();
        let binding = session.bind_contract().unwrap();

        let err = tokio_test::assert_err!(session.import_identity("foo bar"));
        assert!(matches!(err, Error::InvalidMnemonic(_)));

        assert_eq!(session.state(), SessionState::BoundReady);
        assert_eq!(
            session.identity().unwrap().address().to_checksum(None),
            TEST_ADDRESS
        );
        assert!(session.check_binding(&binding).is_ok());
    }

    #[tokio::test]
    async fn test_create_twice_invalidates_first_binding() {
        let (mut session, _asserter) = session();
        let first = session.create_identity().unwrap().address();
        let stale = session.bind_contract().unwrap();

        let second = session.create_identity().unwrap().address();
        assert_ne!(first, second);

        // Rejected before any request is made; the asserter has nothing queued
        assert!(matches!(
            session.retrieve(&stale).await,
            Err(Error::StaleBinding)
        ));
        assert!(matches!(
            session.store(&stale, "1").await,
            Err(Error::StaleBinding)
        ));
    }

    #[test]
    fn test_reimport_same_phrase_still_replaces_binding() {
        let (mut session, _asserter) = session();
        session.import_identity(TEST_PHRASE).unwrap();
        let first = session.bind_contract().unwrap();

        session.import_identity(TEST_PHRASE).unwrap();
        assert_eq!(first.identity_address(), session.identity().unwrap().address());
        assert!(matches!(
            session.check_binding(&first),
            Err(Error::StaleBinding)
        ));
    }

    #[test]
    fn test_bind_twice_is_equivalent() {
        let (mut session, _asserter) = session();
        session.import_identity(TEST_PHRASE).unwrap();

        let a = session.bind_contract().unwrap();
        let b = session.bind_contract().unwrap();

        assert_eq!(a.contract_address(), b.contract_address());
        assert_eq!(a.identity_address(), b.identity_address());
        assert_eq!(a.generation(), b.generation());
        assert!(session.check_binding(&a).is_ok());
        assert!(session.check_binding(&b).is_ok());
    }

    #[tokio::test]
    async fn test_store_rejects_bad_values_without_network() {
        let (mut session, asserter) = session();
        session.import_identity(TEST_PHRASE).unwrap();
        let binding = session.bind_contract().unwrap();

        // Queued for the retrieve below; a store that reached the network would consume it
        asserter.push_success(&abi_word(U256::from(7u64)));

        let too_big = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        for bad in ["-1", "", "  ", "abc", "1.5", "0x", too_big] {
            let err = session.store(&binding, bad).await.unwrap_err();
            assert!(matches!(err, Error::Submission(_)), "{:?} -> {:?}", bad, err);
        }

        let stored = session.retrieve(&binding).await.unwrap();
        assert_eq!(stored.raw(), U256::from(7u64));
    }

    #[tokio::test]
    async fn test_store_network_failure_is_submission_error() {
        let (mut session, asserter) = session();
        session.import_identity(TEST_PHRASE).unwrap();
        let binding = session.bind_contract().unwrap();

        asserter.push_failure_msg("insufficient funds for gas");

        let err = session.store(&binding, "42").await.unwrap_err();
        assert!(matches!(err, Error::Submission(_)));
    }

    #[tokio::test]
    async fn test_retrieve_zero() {
        let (mut session, asserter) = session();
        session.create_identity().unwrap();
        let binding = session.bind_contract().unwrap();

        asserter.push_success(&abi_word(U256::ZERO));

        let value = session.retrieve(&binding).await.unwrap();
        assert_eq!(value.to_string(), "0.0");
    }

    #[tokio::test]
    async fn test_retrieve_formats_as_base_unit() {
        let (mut session, asserter) = session();
        session.create_identity().unwrap();
        let binding = session.bind_contract().unwrap();

        asserter.push_success(&abi_word(U256::from(2_500_000_000_000_000_000u128)));

        let value = session.retrieve(&binding).await.unwrap();
        assert_eq!(value.to_string(), "2.5");
    }

    #[tokio::test]
    async fn test_retrieve_failure_is_query_error() {
        let (mut session, asserter) = session();
        session.create_identity().unwrap();
        let binding = session.bind_contract().unwrap();

        asserter.push_failure_msg("header not found");

        assert!(matches!(
            session.retrieve(&binding).await,
            Err(Error::Query(_))
        ));
    }

    #[tokio::test]
    async fn test_balance_then_network_failure() {
        let (mut session, asserter) = session();
        session.create_identity().unwrap();

        asserter.push_success(&U256::ZERO);
        let balance = session.refresh_balance().await.unwrap();
        assert_eq!(balance.to_string(), "0.0");
        assert_eq!(session.displayed_balance().unwrap().to_string(), "0.0");

        asserter.push_failure_msg("connection reset");
        assert!(matches!(
            session.refresh_balance().await,
            Err(Error::NetworkUnavailable(_))
        ));
        assert_eq!(session.displayed_balance().unwrap().to_string(), "0.0");
        assert_eq!(session.state(), SessionState::IdentityReady);
    }

    #[tokio::test]
    async fn test_stale_balance_reading_is_discarded() {
        let (mut session, asserter) = session();
        session.import_identity(TEST_PHRASE).unwrap();

        asserter.push_success(&U256::from(1_000_000_000_000_000_000u128));
        let identity = session.identity().unwrap();
        let reading = session.query_balance(identity).await.unwrap();
        assert_eq!(reading.balance.to_string(), "1.0");

        session.create_identity().unwrap();

        assert!(!session.record_balance(reading));
        assert!(session.displayed_balance().is_none());
    }

    #[tokio::test]
    async fn test_current_balance_reading_is_applied() {
        let (mut session, asserter) = session();
        session.import_identity(TEST_PHRASE).unwrap();

        asserter.push_success(&U256::from(3u64));
        let identity = session.identity().unwrap();
        let reading = session.query_balance(identity).await.unwrap();

        assert!(session.record_balance(reading));
        assert_eq!(session.displayed_balance().unwrap().raw(), U256::from(3u64));
    }

    #[tokio::test]
    async fn test_refresh_without_identity() {
        let (mut session, _asserter) = session();
        assert!(matches!(
            session.refresh_balance().await,
            Err(Error::NoIdentity)
        ));
    }

    #[tokio::test]
    async fn test_transaction_status_pending() {
        let (session, asserter) = session();
        asserter.push_success(&Option::<TransactionReceipt>::None);

        let status = session.transaction_status(TxHash::ZERO).await.unwrap();
        assert_eq!(status, TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn test_binding_for_other_identity_is_rejected() {
        let (mut session, asserter) = session();
        session.import_identity(TEST_PHRASE).unwrap();
        let generation = session.identity().unwrap().generation();

        // Same generation and contract, different key
        let other = SigningIdentity::random(12, generation).unwrap();
        let foreign = ContractBinding::new(session.contract_address(), &other, session.network());
        assert_ne!(foreign.identity_address(), session.identity().unwrap().address());

        asserter.push_success(&abi_word(U256::from(9u64)));

        assert!(matches!(
            session.retrieve(&foreign).await,
            Err(Error::StaleBinding)
        ));
        assert!(matches!(
            session.store(&foreign, "42").await,
            Err(Error::StaleBinding)
        ));

        // The queued response was never consumed
        let binding = session.bind_contract().unwrap();
        assert_eq!(session.retrieve(&binding).await.unwrap().raw(), U256::from(9u64));
    }

    #[tokio::test]
    async fn test_store_returns_handle() {
        let (mut session, asserter) = session();
        session.import_identity(TEST_PHRASE).unwrap();
        let binding = session.bind_contract().unwrap();

        let tx_hash = B256::repeat_byte(0xab);
        asserter.push_success(&"0x5208");
        asserter.push_success(&json!({
            "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
            "gasUsedRatio": [0.5],
            "oldestBlock": "0x1",
            "reward": [["0x3b9aca00"]]
        }));
        asserter.push_success(&"0x0");
        asserter.push_success(&"0xaa36a7");
        asserter.push_success(&tx_hash);

        let handle = session.store(&binding, "42").await.unwrap();

        assert_eq!(handle.hash, tx_hash);
        assert_eq!(handle.from.to_checksum(None), TEST_ADDRESS);
        assert_eq!(handle.contract, binding.contract_address());
        assert_eq!(handle.value, U256::from(42u64));
    }

    fn receipt(status: &str, block_number: u64) -> serde_json::Value {
        json!({
            "transactionHash": B256::repeat_byte(0xab),
            "transactionIndex": "0x0",
            "blockHash": B256::repeat_byte(0xcd),
            "blockNumber": format!("{:#x}", block_number),
            "from": TEST_ADDRESS,
            "to": STORAGE_CONTRACT_ADDRESS,
            "cumulativeGasUsed": "0xa5e8",
            "gasUsed": "0xa5e8",
            "effectiveGasPrice": "0x3b9aca00",
            "contractAddress": null,
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "type": "0x2",
            "status": status
        })
    }

    #[tokio::test]
    async fn test_transaction_status_confirmed() {
        let (session, asserter) = session();
        asserter.push_success(&receipt("0x1", 1234));

        let status = session.transaction_status(TxHash::ZERO).await.unwrap();
        assert_eq!(
            status,
            TransactionStatus::Confirmed {
                block_number: Some(1234)
            }
        );
    }

    #[tokio::test]
    async fn test_transaction_status_reverted() {
        let (session, asserter) = session();
        asserter.push_success(&receipt("0x0", 77));

        let status = session.transaction_status(TxHash::ZERO).await.unwrap();
        assert_eq!(
            status,
            TransactionStatus::Reverted {
                block_number: Some(77)
            }
        );
    }

    #[tokio::test]
    async fn test_in_flight_query_outlived_by_identity_replacement() {
        let (mut session, asserter) = session();
        session.import_identity(TEST_PHRASE).unwrap();

        let query = session.balance_query().unwrap();
        assert_eq!(query.generation(), 1);
        let in_flight = query.run();

        // Replaced while the query is still pending
        session.create_identity().unwrap();

        asserter.push_success(&U256::from(5u64));
        let reading = in_flight.await.unwrap();
        assert_eq!(reading.address.to_checksum(None), TEST_ADDRESS);

        assert!(!session.record_balance(reading));
        assert!(session.displayed_balance().is_none());
    }

    #[test]
    fn test_balance_query_without_identity() {
        let (session, _asserter) = session();
        assert!(matches!(session.balance_query(), Err(Error::NoIdentity)));
    }

    #[test]
    fn test_parse_store_value() {
        assert_eq!(parse_store_value("42").unwrap(), U256::from(42u64));
        assert_eq!(parse_store_value("  7\n").unwrap(), U256::from(7u64));
        assert_eq!(parse_store_value("0xff").unwrap(), U256::from(255u64));
        assert_eq!(parse_store_value("0").unwrap(), U256::ZERO);
        assert_eq!(
            parse_store_value(
                "115792089237316195423570985008687907853269984665640564039457584007913129639935"
            )
            .unwrap(),
            U256::MAX
        );
        assert!(parse_store_value("-0").is_err());
        assert!(parse_store_value("1e3").is_err());
        assert!(parse_store_value("0xfg").is_err());
    }
}
