//! The `Mail` example of EIP-712, used as a known answer for typed-data hashing.
use alloy::{
    primitives::{address, b256, Address, B256},
    sol,
};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Person {
        string name;
        address wallet;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Mail {
        Person from;
        Person to;
        string contents;
    }
}

pub const DOMAIN_NAME: &str = "Ether Mail";
pub const CHAIN_ID: u64 = 1;
pub const VERIFYING_CONTRACT: Address = address!("CcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC");

pub const DOMAIN_SEPARATOR: B256 =
    b256!("f2cee375fa42b42143804025fc449deafd50cc031ca257e0b194a650a912090f");
pub const SIGNING_HASH: B256 =
    b256!("be609aee343fb3c4b28e1df9e632fca64fcfaede20f02e86244efddf30957bd2");

/// Signature of [`SIGNING_HASH`] by the `cow` key.
pub const COW_SIGNATURE_R: B256 =
    b256!("4355c47d63924e8a72e509b65029052eb6c299d53a04e167c5775fd466751c9d");
pub const COW_SIGNATURE_S: B256 =
    b256!("07299936d304c153f6443dfa05f40ff007d72911b6f72307f996231605b91562");
pub const COW_SIGNATURE_V: u8 = 28;

pub fn mail() -> Mail {
    Mail {
        from: Person {
            name: "Cow".to_string(),
            wallet: crate::accounts::COW_ADDRESS,
        },
        to: Person {
            name: "Bob".to_string(),
            wallet: address!("bBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB"),
        },
        contents: "Hello, Bob!".to_string(),
    }
}
