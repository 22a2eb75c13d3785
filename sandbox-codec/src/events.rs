//! Topics of the events emitted by the Asset and Sand contracts.
use alloy::{
    primitives::{keccak256, B256},
    sol,
    sol_types::SolEvent,
};

sol! {
    // ERC1155 / Asset
    event TransferSingle(address indexed operator, address indexed from, address indexed to, uint256 id, uint256 value);
    event TransferBatch(address indexed operator, address indexed from, address indexed to, uint256[] ids, uint256[] values);
    event URI(string value, uint256 indexed id);
    event OfferClaimed(address indexed seller, address indexed buyer, address token, uint256 buyAmount, uint256[] auctionData, uint256[] ids, uint256[] amounts, bytes signature);
    event OfferCancelled(address indexed seller, uint256 indexed offerId);
    event Extraction(uint256 indexed fromId, uint256 toId, string uri);
    event Creator(uint256 indexed id, address indexed creator);

    // ERC20 / ERC777 / Sand
    event Transfer(address indexed from, address indexed to, uint256 value);
    event Approval(address indexed owner, address indexed spender, uint256 value);
    event AuthorizedOperator(address indexed operator, address indexed tokenHolder);
    event RevokedOperator(address indexed operator, address indexed tokenHolder);
    event Burned(address indexed operator, address indexed from, uint256 amount, bytes data, bytes operatorData);
    event Minted(address indexed operator, address indexed to, uint256 amount, bytes operatorData);
    event Sent(address indexed operator, address indexed from, address indexed to, uint256 amount, bytes data, bytes operatorData);
    event MetaTx(address indexed from, uint256 indexed nonce, bool success, bytes returnData);
}

/// Topic of an event given its canonical signature, e.g. `Transfer(address,address,uint256)`.
pub fn encode_event_signature(signature: &str) -> B256 {
    keccak256(signature.trim())
}

/// Canonical signature and topic of every event listed above.
pub fn known_events() -> Vec<(&'static str, B256)> {
    fn entry<E: SolEvent>() -> (&'static str, B256) {
        (E::SIGNATURE, E::SIGNATURE_HASH)
    }

    vec![
        entry::<TransferSingle>(),
        entry::<TransferBatch>(),
        entry::<URI>(),
        entry::<OfferClaimed>(),
        entry::<OfferCancelled>(),
        entry::<Extraction>(),
        entry::<Creator>(),
        entry::<Transfer>(),
        entry::<Approval>(),
        entry::<AuthorizedOperator>(),
        entry::<RevokedOperator>(),
        entry::<Burned>(),
        entry::<Minted>(),
        entry::<Sent>(),
        entry::<MetaTx>(),
    ]
}

/// Signature of the known event whose topic is `topic`.
pub fn lookup_event(topic: &B256) -> Option<&'static str> {
    known_events()
        .into_iter()
        .find_map(|(signature, hash)| (hash == *topic).then_some(signature))
}
