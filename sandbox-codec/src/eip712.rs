//! EIP-712 domain handling shared by every typed message signed for the
//! Sandbox contracts.
use alloy::{
    primitives::{b256, keccak256, Address, Bytes, B256, U256},
    sol_types::{Eip712Domain, SolStruct, SolValue},
};
use log::debug;
use std::borrow::Cow;

use crate::error::SignatureError;

pub const SANDBOX_DOMAIN_NAME: &str = "The Sandbox 3D";
pub const SANDBOX_DOMAIN_VERSION: &str = "1";
/// Salt the Asset contract folds into `getDomain()`.
pub const ASSET_DOMAIN_SALT: B256 =
    b256!("aff39a157310c8472aa1e1b079033d4a574d9816330ed82033265f75cf260163");
/// The domain type. The salt never takes part in it, even when one is set.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

pub fn domain_type_hash() -> B256 {
    keccak256(DOMAIN_TYPE)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
    pub salt: Option<B256>,
}

impl Domain {
    /// Sandbox domain on `chain_id` for the contract at `verifying_contract`.
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: SANDBOX_DOMAIN_NAME.to_string(),
            version: SANDBOX_DOMAIN_VERSION.to_string(),
            chain_id,
            verifying_contract,
            salt: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_salt(mut self, salt: B256) -> Self {
        self.salt = Some(salt);
        self
    }

    /// The domain as hashed into typed-data digests. The salt is dropped here.
    pub fn to_eip712(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(Cow::Owned(self.name.clone())),
            Some(Cow::Owned(self.version.clone())),
            Some(U256::from(self.chain_id)),
            Some(self.verifying_contract),
            None,
        )
    }

    pub fn type_hash(&self) -> B256 {
        self.to_eip712().type_hash()
    }

    pub fn separator(&self) -> B256 {
        self.to_eip712().separator()
    }

    /// Tightly packed, salted separator returned by the Asset contract's
    /// `getDomain()`:
    ///
    /// `keccak256(typeHash ++ keccak256(name) ++ keccak256(version) ++ uint256(chainId) ++ address ++ salt)`
    pub fn packed_salted_separator(&self) -> Result<B256, SignatureError> {
        let salt = self.salt.ok_or(SignatureError::MissingSalt)?;
        let packed = (
            domain_type_hash(),
            keccak256(&self.name),
            keccak256(&self.version),
            U256::from(self.chain_id),
            self.verifying_contract,
            salt,
        )
            .abi_encode_packed();
        Ok(keccak256(packed))
    }

    /// `keccak256(0x1901 ++ separator ++ hashStruct(message))`
    pub fn signing_hash<T: SolStruct>(&self, message: &T) -> B256 {
        let digest = message.eip712_signing_hash(&self.to_eip712());
        debug!(
            "{} digest on chain {} for {}: {digest}",
            T::NAME,
            self.chain_id,
            self.verifying_contract
        );
        digest
    }
}

/// Concatenate each value as a 32-byte big-endian word, the way the contracts
/// expect `uint256` lists passed as `bytes`.
pub fn pack_uint256s(values: &[U256]) -> Bytes {
    values
        .iter()
        .flat_map(|v| v.to_be_bytes::<32>())
        .collect::<Vec<_>>()
        .into()
}
