//! Token identifier packing for the Asset contract.
//!
//! A token id is a 256-bit word laid out as:
//!
//! ```text
//! | creator (160 bits) | marker (1 bit) | nft index / legacy supply (39 bits) | slot (56 bits) |
//! ```
//!
//! where `slot = fixed_id + index`. The contract computes the same word with
//! multiplications by fixed constants, so the fields are expressed the same way
//! here to stay bit for bit identical.
use alloy::primitives::{Address, U256};
use log::debug;
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::error::TokenIdError;

/// `0x1000000000000000000000000`, i.e. 2^96. Places the creator in the top 160 bits.
pub const CREATOR_MULTIPLIER: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);
/// `0x100000000000000`, i.e. 2^56. Factor of the NFT index (and of the legacy supply).
pub const NFT_INDEX_MULTIPLIER: U256 = U256::from_limbs([1 << 56, 0, 0, 0]);
/// `0x800000000000000000000000`, i.e. 2^95. Set for every multi-copy token.
pub const MULTI_COPY_MARKER: U256 = U256::from_limbs([0, 1 << 31, 0, 0]);

/// Number of bits reserved for `fixed_id + index`.
pub const SLOT_BITS: usize = 56;
/// Number of bits available to the NFT index below the multi-copy marker.
pub const NFT_INDEX_BITS: usize = 39;
/// Bit offset of the creator address.
pub const CREATOR_OFFSET: usize = 96;

const MARKER_BIT: usize = 95;
const LOW_MASK: U256 = U256::from_limbs([u64::MAX, (1 << 32) - 1, 0, 0]);
const MAX_SLOT: u64 = (1 << SLOT_BITS) - 1;
const MAX_NFT_INDEX: u64 = (1 << NFT_INDEX_BITS) - 1;

/// A packed Asset token id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(pub U256);

impl TokenId {
    /// The creator recorded in the top 160 bits.
    pub fn creator(&self) -> Address {
        Address::from_slice(&self.0.to_be_bytes::<32>()[..20])
    }

    /// Whether the multi-copy marker is set. Does not depend on the scheme.
    pub fn is_multi(&self) -> bool {
        self.0.bit(MARKER_BIT)
    }

    pub fn is_nft(&self) -> bool {
        !self.is_multi()
    }

    /// `fixed_id + index` as packed in the low bits.
    pub fn slot(&self) -> u64 {
        self.0.as_limbs()[0] & MAX_SLOT
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn decode(&self, scheme: TokenIdScheme) -> Result<TokenIdParts, TokenIdError> {
        scheme.decode(*self)
    }
}

impl From<U256> for TokenId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<TokenId> for U256 {
    fn from(value: TokenId) -> Self {
        value.0
    }
}

/// Token ids are exchanged as decimal strings, the way event payloads carry them.
impl Display for TokenId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts a decimal string or a `0x` prefixed hex string.
impl FromStr for TokenId {
    type Err = TokenIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        U256::from_str(s.trim())
            .map(TokenId)
            .map_err(|_| TokenIdError::InvalidTokenId(s.to_string()))
    }
}

/// Supply class of a minted token, selecting one of the two encodings of the
/// bits between the creator and the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SupplyClass {
    /// Supply of exactly one.
    Single { nft_index: u64 },
    /// Supply above one.
    Multi { supply: u64 },
}

impl SupplyClass {
    /// Classify a mint request the way the contract does: a supply of one is an
    /// NFT, anything above is multi-copy.
    pub fn from_supply(supply: u64, nft_index: u64) -> Result<Self, TokenIdError> {
        match supply {
            0 => Err(TokenIdError::ZeroSupply),
            1 => Ok(Self::Single { nft_index }),
            supply => Ok(Self::Multi { supply }),
        }
    }

    pub fn supply(&self) -> u64 {
        match self {
            Self::Single { .. } => 1,
            Self::Multi { supply } => *supply,
        }
    }

    pub fn is_nft(&self) -> bool {
        matches!(self, Self::Single { .. })
    }
}

/// What can be read back from a token id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Nft { nft_index: u64 },
    /// The supply is only recoverable from ids of the legacy scheme.
    Multi { supply: Option<u64> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokenIdParts {
    pub creator: Address,
    pub kind: TokenKind,
    pub slot: u64,
}

/// The two generations of the id layout found in deployed Asset contracts.
///
/// `Current` only flags multi-copy tokens with [`MULTI_COPY_MARKER`]. `Legacy`
/// also folds the supply into the bits below the marker. Which one applies
/// depends on the contract version being talked to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TokenIdScheme {
    #[default]
    Current,
    Legacy,
}

impl TokenIdScheme {
    /// Pack a token id.
    pub fn encode(
        &self,
        creator: Address,
        class: SupplyClass,
        fixed_id: u64,
        index: u64,
    ) -> Result<TokenId, TokenIdError> {
        let slot = slot_of(fixed_id, index)?;
        let class_bits = self.class_bits(class)?;
        let id = U256::from_be_slice(creator.as_slice()) * CREATOR_MULTIPLIER
            + class_bits
            + U256::from(slot);
        debug!(
            "token id for creator {creator} ({class:?}, slot {slot}) with {:?} scheme: {id}",
            self
        );
        Ok(TokenId(id))
    }

    /// Same as [`Self::encode`] from the raw values of a mint call.
    pub fn generate(
        &self,
        creator: &str,
        supply: u64,
        fixed_id: u64,
        index: u64,
        nft_index: u64,
    ) -> Result<TokenId, TokenIdError> {
        let creator = parse_creator(creator)?;
        let class = SupplyClass::from_supply(supply, nft_index)?;
        self.encode(creator, class, fixed_id, index)
    }

    /// Unpack a token id produced by this scheme.
    pub fn decode(&self, id: TokenId) -> Result<TokenIdParts, TokenIdError> {
        let low = id.0 & LOW_MASK;
        let class_bits = (low >> SLOT_BITS).to::<u64>();
        let kind = if id.is_multi() {
            let below_marker = class_bits & MAX_NFT_INDEX;
            match self {
                Self::Current if below_marker != 0 => {
                    return Err(TokenIdError::Undecodable {
                        id: id.0,
                        reason: "bits between the marker and the slot must be clear",
                    })
                }
                Self::Current => TokenKind::Multi { supply: None },
                Self::Legacy if below_marker < 2 => {
                    return Err(TokenIdError::Undecodable {
                        id: id.0,
                        reason: "legacy multi-copy ids carry a supply above 1",
                    })
                }
                Self::Legacy => TokenKind::Multi {
                    supply: Some(below_marker),
                },
            }
        } else {
            TokenKind::Nft {
                nft_index: class_bits,
            }
        };

        Ok(TokenIdParts {
            creator: id.creator(),
            kind,
            slot: id.slot(),
        })
    }

    fn class_bits(&self, class: SupplyClass) -> Result<U256, TokenIdError> {
        match (self, class) {
            (_, SupplyClass::Single { nft_index }) => {
                if nft_index > MAX_NFT_INDEX {
                    return Err(TokenIdError::NftIndexOverflow(nft_index, NFT_INDEX_BITS));
                }
                Ok(U256::from(nft_index) * NFT_INDEX_MULTIPLIER)
            }
            (_, SupplyClass::Multi { supply }) if supply < 2 => {
                Err(TokenIdError::InvalidMultiSupply(supply))
            }
            (Self::Current, SupplyClass::Multi { .. }) => Ok(MULTI_COPY_MARKER),
            (Self::Legacy, SupplyClass::Multi { supply }) => {
                if supply > MAX_NFT_INDEX {
                    return Err(TokenIdError::SupplyOverflow(supply, NFT_INDEX_BITS));
                }
                Ok(MULTI_COPY_MARKER + U256::from(supply) * NFT_INDEX_MULTIPLIER)
            }
        }
    }
}

/// Parse a creator address, checksummed or lowercase, with or without `0x`.
pub fn parse_creator(creator: &str) -> Result<Address, TokenIdError> {
    Address::from_str(creator.trim()).map_err(|_| TokenIdError::InvalidCreator(creator.to_string()))
}

fn slot_of(fixed_id: u64, index: u64) -> Result<u64, TokenIdError> {
    fixed_id
        .checked_add(index)
        .filter(|slot| *slot <= MAX_SLOT)
        .ok_or(TokenIdError::SlotOverflow {
            fixed_id,
            index,
            bits: SLOT_BITS,
        })
}

/// Token id, as a decimal string, of the `index`-th token of a mint made by
/// `creator` with the given `supply` and `fixed_id`.
pub fn generate_token_id(
    creator: &str,
    supply: u64,
    fixed_id: u64,
    index: u64,
    nft_index: u64,
) -> Result<String, TokenIdError> {
    TokenIdScheme::Current
        .generate(creator, supply, fixed_id, index, nft_index)
        .map(|id| id.to_string())
}

/// [`generate_token_id`] against contracts still folding the supply into multi-copy ids.
pub fn generate_legacy_token_id(
    creator: &str,
    supply: u64,
    fixed_id: u64,
    index: u64,
    nft_index: u64,
) -> Result<String, TokenIdError> {
    TokenIdScheme::Legacy
        .generate(creator, supply, fixed_id, index, nft_index)
        .map(|id| id.to_string())
}
