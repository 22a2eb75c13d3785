use alloy::primitives::U256;
use thiserror::Error;

use crate::batch::IdRange;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenIdError {
    #[error("`{0}`: invalid creator address")]
    InvalidCreator(String),

    #[error("supply must be at least 1")]
    ZeroSupply,

    #[error("multi-copy tokens need a supply above 1, got {0}")]
    InvalidMultiSupply(u64),

    #[error("fixed id {fixed_id} + index {index} does not fit in {bits} bits")]
    SlotOverflow { fixed_id: u64, index: u64, bits: usize },

    #[error("nft index {0} does not fit in {1} bits")]
    NftIndexOverflow(u64, usize),

    #[error("supply {0} does not fit in {1} bits of the legacy encoding")]
    SupplyOverflow(u64, usize),

    #[error("`{0}`: unable to parse a token id")]
    InvalidTokenId(String),

    #[error("{id} was not produced by this scheme: {reason}")]
    Undecodable { id: U256, reason: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("supply {supply} at position {position} is not a multi-copy supply; mint NFTs through the NFT count")]
    InvalidSupply { position: usize, supply: u64 },

    #[error("range {requested} overlaps already reserved range {existing}")]
    Overlap { requested: IdRange, existing: IdRange },

    #[error("range starting at {start} with {len} ids exceeds the slot budget")]
    RangeOverflow { start: u64, len: u64 },

    #[error(transparent)]
    TokenId(#[from] TokenIdError),
}

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("ids and amounts must have the same length (ids: {ids}, amounts: {amounts})")]
    LengthMismatch { ids: usize, amounts: usize },

    #[error("the packed domain separator needs a salt")]
    MissingSalt,

    #[error("signature must be 65 bytes, got {0}")]
    InvalidLength(usize),

    #[error("signing failed: {0}")]
    Signing(#[from] alloy::signers::Error),

    #[error("unable to recover signer: {0}")]
    Recovery(#[from] alloy::primitives::SignatureError),
}
