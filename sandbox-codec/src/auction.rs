//! Seller offers for the signed auction of the Asset contract.
//!
//! A seller signs an `Auction` message off-chain; buyers submit it with
//! `claimSellerOffer`, which rebuilds the digest and checks the signer with
//! `ecrecover`. Token ids and amounts travel as `bytes`, each value a 32-byte
//! big-endian word.
use alloy::{
    primitives::{keccak256, Address, B256, U256},
    signers::local::PrivateKeySigner,
    sol,
    sol_types::SolStruct,
};
use log::{debug, warn};
use rand::{thread_rng, Rng};

use crate::{
    eip712::{pack_uint256s, Domain},
    error::SignatureError,
    signer::{recover_typed_signer, sign_typed, signer_from_hex, SignedPayload},
};

pub const AUCTION_TYPE: &str = "Auction(address token,uint256 offerId,uint256 startingPrice,uint256 endingPrice,uint256 startedAt,uint256 duration,uint256 packs,bytes ids,bytes amounts)";

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Auction {
        address token;
        uint256 offerId;
        uint256 startingPrice;
        uint256 endingPrice;
        uint256 startedAt;
        uint256 duration;
        uint256 packs;
        bytes ids;
        bytes amounts;
    }
}

pub fn auction_type_hash() -> B256 {
    keccak256(AUCTION_TYPE)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuctionOffer {
    /// Payment token, the zero address for ether.
    pub token: Address,
    pub offer_id: U256,
    pub starting_price: U256,
    pub ending_price: U256,
    pub started_at: U256,
    pub duration: U256,
    /// Number of bundles on sale.
    pub packs: U256,
    pub ids: Vec<U256>,
    /// Amount of each id in one pack.
    pub amounts: Vec<U256>,
}

impl AuctionOffer {
    /// Draw a fresh 256-bit offer id.
    pub fn with_random_offer_id(mut self) -> Self {
        self.offer_id = U256::from_be_bytes(thread_rng().gen::<[u8; 32]>());
        self
    }

    /// The typed message, with ids and amounts packed as `bytes`.
    pub fn to_typed(&self) -> Result<Auction, SignatureError> {
        if self.ids.len() != self.amounts.len() {
            return Err(SignatureError::LengthMismatch {
                ids: self.ids.len(),
                amounts: self.amounts.len(),
            });
        }
        if self.ids.is_empty() {
            warn!("offer {} does not sell any token", self.offer_id);
        }
        Ok(Auction {
            token: self.token,
            offerId: self.offer_id,
            startingPrice: self.starting_price,
            endingPrice: self.ending_price,
            startedAt: self.started_at,
            duration: self.duration,
            packs: self.packs,
            ids: pack_uint256s(&self.ids),
            amounts: pack_uint256s(&self.amounts),
        })
    }

    /// `[offerId, startingPrice, endingPrice, startedAt, duration, packs]`, the
    /// `auctionData` argument of `claimSellerOffer`.
    pub fn contract_args(&self) -> [U256; 6] {
        [
            self.offer_id,
            self.starting_price,
            self.ending_price,
            self.started_at,
            self.duration,
            self.packs,
        ]
    }

    pub fn struct_hash(&self) -> Result<B256, SignatureError> {
        Ok(self.to_typed()?.eip712_hash_struct())
    }

    pub fn signing_hash(&self, domain: &Domain) -> Result<B256, SignatureError> {
        Ok(domain.signing_hash(&self.to_typed()?))
    }

    pub fn sign(
        &self,
        signer: &PrivateKeySigner,
        domain: &Domain,
    ) -> Result<SignedPayload, SignatureError> {
        let signed = sign_typed(signer, domain, &self.to_typed()?)?;
        debug!(
            "offer {} by {} for {} ids",
            self.offer_id,
            signer.address(),
            self.ids.len()
        );
        Ok(signed)
    }
}

/// Sign `offer` with the hex encoded `private_key` of the seller.
pub fn sign_auction_offer(
    private_key: &str,
    domain: &Domain,
    offer: &AuctionOffer,
) -> Result<SignedPayload, SignatureError> {
    offer.sign(&signer_from_hex(private_key)?, domain)
}

/// The address the contract recovers from `signature` for `offer`. Any
/// difference between the signed and the submitted offer yields an unrelated
/// address rather than an error.
pub fn recover_auction_signer(
    signature: &[u8],
    domain: &Domain,
    offer: &AuctionOffer,
) -> Result<Address, SignatureError> {
    recover_typed_signer(signature, domain, &offer.to_typed()?)
}
