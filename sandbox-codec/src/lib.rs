//! Off-chain helpers for the Sandbox Asset and Sand contracts: token id
//! packing, batch id ranges, and the typed-data signatures their entry points
//! verify.
pub use auction::{recover_auction_signer, sign_auction_offer, AuctionOffer};
pub use batch::{IdRange, MintBatch, RangeRegistry};
pub use config::SigningConfig;
pub use eip712::{pack_uint256s, Domain};
pub use error::{BatchError, SignatureError, TokenIdError};
pub use events::encode_event_signature;
pub use meta_tx::{MetaTransaction, MetaTxKind};
pub use signer::SignedPayload;
pub use token_id::{
    generate_legacy_token_id, generate_token_id, SupplyClass, TokenId, TokenIdScheme,
};

pub mod auction;
pub mod batch;
pub mod config;
pub mod eip712;
pub mod error;
pub mod events;
pub mod meta_tx;
pub mod signer;
pub mod token_id;
