//! secp256k1 signing and recovery of 32-byte digests.
//!
//! Signatures are exchanged in the 65-byte `r ++ s ++ v` form checked by
//! `ecrecover`, with `v` in `{27, 28}`.
use alloy::{
    primitives::{eip191_hash_message, Address, Signature, B256},
    signers::{local::PrivateKeySigner, SignerSync},
    sol_types::SolStruct,
};
use log::debug;
use std::fmt::{Display, Formatter};

use crate::{eip712::Domain, error::SignatureError};

pub const SIGNATURE_LENGTH: usize = 65;

/// Parse a hex private key, with or without `0x`.
pub fn signer_from_hex(key: &str) -> Result<PrivateKeySigner, SignatureError> {
    key.trim()
        .parse::<PrivateKeySigner>()
        .map_err(|e| SignatureError::InvalidPrivateKey(e.to_string()))
}

/// A signature together with the digest it signs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedPayload {
    pub digest: B256,
    pub signature: Signature,
}

impl SignedPayload {
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.signature.as_bytes()
    }

    /// Address that produced the signature.
    pub fn signer(&self) -> Result<Address, SignatureError> {
        Ok(self.signature.recover_address_from_prehash(&self.digest)?)
    }
}

impl Display for SignedPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

pub fn sign_digest(signer: &PrivateKeySigner, digest: B256) -> Result<SignedPayload, SignatureError> {
    let signature = signer.sign_hash_sync(&digest)?;
    debug!("{} signed {digest}", signer.address());
    Ok(SignedPayload { digest, signature })
}

/// `ecrecover(digest, v, r, s)` over a 65-byte signature.
pub fn recover_digest_signer(signature: &[u8], digest: &B256) -> Result<Address, SignatureError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(SignatureError::InvalidLength(signature.len()));
    }
    let signature = Signature::from_raw(signature)?;
    Ok(signature.recover_address_from_prehash(digest)?)
}

/// Sign `message` as EIP-712 typed data under `domain`.
pub fn sign_typed<T: SolStruct>(
    signer: &PrivateKeySigner,
    domain: &Domain,
    message: &T,
) -> Result<SignedPayload, SignatureError> {
    sign_digest(signer, domain.signing_hash(message))
}

pub fn recover_typed_signer<T: SolStruct>(
    signature: &[u8],
    domain: &Domain,
    message: &T,
) -> Result<Address, SignatureError> {
    recover_digest_signer(signature, &domain.signing_hash(message))
}

/// `eth_sign` of a 32-byte hash: the hash is wrapped in the
/// `"\x19Ethereum Signed Message:\n32"` prefix before signing.
pub fn sign_prefixed_hash(
    signer: &PrivateKeySigner,
    hash: B256,
) -> Result<SignedPayload, SignatureError> {
    sign_digest(signer, eip191_hash_message(hash))
}

pub fn recover_prefixed_hash_signer(
    signature: &[u8],
    hash: B256,
) -> Result<Address, SignatureError> {
    recover_digest_signer(signature, &eip191_hash_message(hash))
}
