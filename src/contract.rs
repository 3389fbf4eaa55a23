//! Fixed storage contract interface and bindings
//!
//! The contract exposes exactly two methods:
//! - `store(uint256 num)` - state-mutating, signed and paid for by the bound identity
//! - `retrieve() returns (uint256)` - read-only `eth_call`

use crate::network::NetworkConnection;
use crate::wallet::SigningIdentity;
use crate::{Error, Result};
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use std::str::FromStr;

/// Deployed storage contract on the test network
pub const STORAGE_CONTRACT_ADDRESS: &str = "0x94AAAfC3685A5b1b3dd626e5E33e164103dabd21";

sol! {
    #[sol(rpc)]
    contract SimpleStorage {
        function store(uint256 num) external;
        function retrieve() external view returns (uint256);
    }
}

/// Parse a contract address strictly
///
/// Requires a `0x` prefix and exactly 40 hex digits. Mixed-case input must
/// carry a valid EIP-55 checksum; all-lowercase or all-uppercase input has
/// no checksum to verify.
pub fn parse_contract_address(input: &str) -> Result<Address> {
    let hex = input
        .strip_prefix("0x")
        .ok_or_else(|| Error::InvalidAddress(format!("{}: missing 0x prefix", input)))?;

    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidAddress(format!(
            "{}: expected 40 hex digits, got {}",
            input,
            hex.len()
        )));
    }

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());

    if has_lower && has_upper {
        Address::parse_checksummed(input, None)
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", input, e)))
    } else {
        Address::from_str(input).map_err(|e| Error::InvalidAddress(format!("{}: {}", input, e)))
    }
}

/// The storage contract bound to one signing identity
///
/// A binding captures the identity it was built for. When the session
/// replaces that identity the binding goes stale and has to be rebuilt.
#[derive(Clone)]
pub struct ContractBinding {
    contract: Address,
    identity: Address,
    generation: u64,
    reader: SimpleStorage::SimpleStorageInstance<DynProvider>,
    writer: SimpleStorage::SimpleStorageInstance<DynProvider>,
}

impl ContractBinding {
    /// Bind `contract` to `identity` on `network`
    ///
    /// No network call happens here.
    pub fn new(contract: Address, identity: &SigningIdentity, network: &NetworkConnection) -> Self {
        let reader = network.provider().clone();
        let signer = ProviderBuilder::new()
            .wallet(identity.wallet().clone())
            .connect_provider(reader.clone())
            .erased();

        Self {
            contract,
            identity: identity.address(),
            generation: identity.generation(),
            reader: SimpleStorage::new(contract, reader),
            writer: SimpleStorage::new(contract, signer),
        }
    }

    /// Address of the bound contract
    pub fn contract_address(&self) -> Address {
        self.contract
    }

    /// Address of the identity that signs `store` calls
    pub fn identity_address(&self) -> Address {
        self.identity
    }

    /// Generation of the identity this binding was built for
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn reader(&self) -> &SimpleStorage::SimpleStorageInstance<DynProvider> {
        &self.reader
    }

    pub(crate) fn writer(&self) -> &SimpleStorage::SimpleStorageInstance<DynProvider> {
        &self.writer
    }
}

impl std::fmt::Debug for ContractBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractBinding")
            .field("contract", &self.contract)
            .field("identity", &self.identity)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
