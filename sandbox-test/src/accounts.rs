//! Well-known keys used across the signature tests.

use alloy::{
    primitives::{address, keccak256, Address},
    signers::local::PrivateKeySigner,
};

/// Address of the account whose private key is `keccak256("cow")`.
pub const COW_ADDRESS: Address = address!("CD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826");

/// Meta transaction signer.
pub const SIGNING_ACCOUNT_ADDRESS: Address = address!("FA8A6079E7B85d1be95B6f6DE1aAE903b6F40c00");
pub const SIGNING_ACCOUNT_KEY: &str =
    "0xeee5270a5c46e5b92510d70fa4d445a8cdd5010dde5b1fccc6a2bd1a9df8f5c0";

/// A second signer, never the one a message is built for.
pub const OTHER_SIGNER_ADDRESS: Address = address!("75aE6abE03070a906d7a9d5C1607605DE73a0880");
pub const OTHER_SIGNER_KEY: &str =
    "0x3c42a6c587e8a82474031cc06f1e6af7f5301bb2417b89d98eb3023d0ce659f6";

/// Creator used by the token id tests.
pub const SAMPLE_CREATOR: Address = address!("61c461EcC993aCDeAbDD52Ed2fDB17A3C4ccF0c4");

/// The seller key of the auction tests.
pub fn cow_signer() -> PrivateKeySigner {
    PrivateKeySigner::from_bytes(&keccak256("cow")).expect("keccak output is a valid key")
}

pub fn signing_account() -> PrivateKeySigner {
    SIGNING_ACCOUNT_KEY
        .parse()
        .expect("hardcoded key is valid")
}

pub fn other_signer() -> PrivateKeySigner {
    OTHER_SIGNER_KEY.parse().expect("hardcoded key is valid")
}
