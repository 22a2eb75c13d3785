//! Sand meta-transactions: transfers signed by the token holder and relayed by
//! a third party paid in Sand.
//!
//! Two signing flavours are accepted by the Sand contract. The EIP-712 one
//! signs `ERC20MetaTransaction` / `ERC777MetaTransaction` typed data. The
//! "basic signature" one signs, through `eth_sign`, a packed hash of the token
//! address, the type hash and every field.
use alloy::{
    primitives::{keccak256, Address, Bytes, B256, U256},
    signers::local::PrivateKeySigner,
    sol,
    sol_types::{SolStruct, SolValue},
};
use log::debug;
use std::fmt::{Display, Formatter};

use crate::{
    eip712::Domain,
    error::SignatureError,
    signer::{
        recover_prefixed_hash_signer, recover_typed_signer, sign_prefixed_hash, sign_typed,
        SignedPayload,
    },
};

pub const ERC20_META_TX_TYPE: &str = "ERC20MetaTransaction(address from,address to,uint256 amount,bytes data,uint256 nonce,uint256 gasPrice,uint256 gasLimit,uint256 tokenGasPrice,address relayer)";
pub const ERC777_META_TX_TYPE: &str = "ERC777MetaTransaction(address from,address to,uint256 amount,bytes data,uint256 nonce,uint256 gasPrice,uint256 gasLimit,uint256 tokenGasPrice,address relayer)";
pub const APPROVE_TYPE: &str = "Approve(address from,uint256 messageId,address target,uint256 amount)";

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct ERC20MetaTransaction {
        address from;
        address to;
        uint256 amount;
        bytes data;
        uint256 nonce;
        uint256 gasPrice;
        uint256 gasLimit;
        uint256 tokenGasPrice;
        address relayer;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct ERC777MetaTransaction {
        address from;
        address to;
        uint256 amount;
        bytes data;
        uint256 nonce;
        uint256 gasPrice;
        uint256 gasLimit;
        uint256 tokenGasPrice;
        address relayer;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Approve {
        address from;
        uint256 messageId;
        address target;
        uint256 amount;
    }
}

/// Which entry point of the Sand contract executes the meta-transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MetaTxKind {
    #[default]
    Erc20,
    Erc777,
}

impl MetaTxKind {
    pub fn type_string(&self) -> &'static str {
        match self {
            Self::Erc20 => ERC20_META_TX_TYPE,
            Self::Erc777 => ERC777_META_TX_TYPE,
        }
    }

    pub fn type_hash(&self) -> B256 {
        keccak256(self.type_string())
    }

    /// Name of the contract method consuming an EIP-712 signature of this kind.
    pub fn execute_method(&self) -> &'static str {
        match self {
            Self::Erc20 => "executeERC20MetaTx",
            Self::Erc777 => "executeERC777MetaTx",
        }
    }
}

impl Display for MetaTxKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Erc20 => write!(f, "ERC20MetaTransaction"),
            Self::Erc777 => write!(f, "ERC777MetaTransaction"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaTransaction {
    pub kind: MetaTxKind,
    pub from: Address,
    pub to: Address,
    pub amount: U256,
    /// Call data forwarded to `to`, empty for plain transfers.
    pub data: Bytes,
    pub nonce: U256,
    pub gas_price: U256,
    pub gas_limit: U256,
    pub token_gas_price: U256,
    pub relayer: Address,
}

impl MetaTransaction {
    /// `[nonce, gasPrice, gasLimit, tokenGasPrice]` as grouped in the
    /// `execute*MetaTx` calls.
    pub fn params(&self) -> [U256; 4] {
        [self.nonce, self.gas_price, self.gas_limit, self.token_gas_price]
    }

    pub fn to_erc20(&self) -> ERC20MetaTransaction {
        ERC20MetaTransaction {
            from: self.from,
            to: self.to,
            amount: self.amount,
            data: self.data.clone(),
            nonce: self.nonce,
            gasPrice: self.gas_price,
            gasLimit: self.gas_limit,
            tokenGasPrice: self.token_gas_price,
            relayer: self.relayer,
        }
    }

    pub fn to_erc777(&self) -> ERC777MetaTransaction {
        ERC777MetaTransaction {
            from: self.from,
            to: self.to,
            amount: self.amount,
            data: self.data.clone(),
            nonce: self.nonce,
            gasPrice: self.gas_price,
            gasLimit: self.gas_limit,
            tokenGasPrice: self.token_gas_price,
            relayer: self.relayer,
        }
    }

    pub fn signing_hash(&self, domain: &Domain) -> B256 {
        match self.kind {
            MetaTxKind::Erc20 => domain.signing_hash(&self.to_erc20()),
            MetaTxKind::Erc777 => domain.signing_hash(&self.to_erc777()),
        }
    }
}

/// EIP-712 signature of `tx`, for `executeERC20MetaTx` / `executeERC777MetaTx`.
pub fn sign_meta_tx(
    signer: &PrivateKeySigner,
    domain: &Domain,
    tx: &MetaTransaction,
) -> Result<SignedPayload, SignatureError> {
    debug!("{} {} -> {} nonce {}", tx.kind, tx.from, tx.to, tx.nonce);
    match tx.kind {
        MetaTxKind::Erc20 => sign_typed(signer, domain, &tx.to_erc20()),
        MetaTxKind::Erc777 => sign_typed(signer, domain, &tx.to_erc777()),
    }
}

pub fn recover_meta_tx_signer(
    signature: &[u8],
    domain: &Domain,
    tx: &MetaTransaction,
) -> Result<Address, SignatureError> {
    match tx.kind {
        MetaTxKind::Erc20 => recover_typed_signer(signature, domain, &tx.to_erc20()),
        MetaTxKind::Erc777 => recover_typed_signer(signature, domain, &tx.to_erc777()),
    }
}

/// Hash checked by the `…ViaBasicSignature` entry points of the Sand contract
/// at address `token`, before the `eth_sign` prefix is applied.
pub fn basic_signature_hash(token: Address, tx: &MetaTransaction) -> B256 {
    let packed = (
        token,
        tx.kind.type_hash(),
        tx.from,
        tx.to,
        tx.amount,
        keccak256(&tx.data),
        tx.nonce,
        tx.gas_price,
        tx.gas_limit,
        tx.token_gas_price,
        tx.relayer,
    )
        .abi_encode_packed();
    keccak256(packed)
}

pub fn sign_basic_meta_tx(
    signer: &PrivateKeySigner,
    token: Address,
    tx: &MetaTransaction,
) -> Result<SignedPayload, SignatureError> {
    sign_prefixed_hash(signer, basic_signature_hash(token, tx))
}

pub fn recover_basic_meta_tx_signer(
    signature: &[u8],
    token: Address,
    tx: &MetaTransaction,
) -> Result<Address, SignatureError> {
    recover_prefixed_hash_signer(signature, basic_signature_hash(token, tx))
}

/// Pre-approval of `target` spending `amount` on behalf of `from`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Approval {
    pub from: Address,
    pub message_id: U256,
    pub target: Address,
    pub amount: U256,
}

impl Approval {
    pub fn to_typed(&self) -> Approve {
        Approve {
            from: self.from,
            messageId: self.message_id,
            target: self.target,
            amount: self.amount,
        }
    }

    pub fn struct_hash(&self) -> B256 {
        self.to_typed().eip712_hash_struct()
    }
}

pub fn sign_approval(
    signer: &PrivateKeySigner,
    domain: &Domain,
    approval: &Approval,
) -> Result<SignedPayload, SignatureError> {
    sign_typed(signer, domain, &approval.to_typed())
}

pub fn recover_approval_signer(
    signature: &[u8],
    domain: &Domain,
    approval: &Approval,
) -> Result<Address, SignatureError> {
    recover_typed_signer(signature, domain, &approval.to_typed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{b256, bytes};
    use rstest::rstest;
    use sandbox_test::{
        accounts::{other_signer, signing_account, OTHER_SIGNER_ADDRESS, SIGNING_ACCOUNT_ADDRESS},
        utils::random_address,
    };

    const EMPTY_DATA_HASH: B256 =
        b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");

    fn transfer(kind: MetaTxKind) -> MetaTransaction {
        MetaTransaction {
            kind,
            from: SIGNING_ACCOUNT_ADDRESS,
            to: random_address(),
            amount: U256::from(1000),
            nonce: U256::from(1),
            gas_price: U256::from(1),
            gas_limit: U256::from(2_000_000),
            token_gas_price: U256::from(1),
            relayer: Address::ZERO,
            ..Default::default()
        }
    }

    #[test]
    fn type_strings_are_the_contract_ones() {
        assert_eq!(ERC20MetaTransaction::eip712_encode_type(), ERC20_META_TX_TYPE);
        assert_eq!(ERC777MetaTransaction::eip712_encode_type(), ERC777_META_TX_TYPE);
        assert_eq!(Approve::eip712_encode_type(), APPROVE_TYPE);
        assert_ne!(MetaTxKind::Erc20.type_hash(), MetaTxKind::Erc777.type_hash());
        assert_eq!(MetaTxKind::Erc777.execute_method(), "executeERC777MetaTx");
        assert_eq!(MetaTxKind::Erc20.to_string(), ERC20MetaTransaction::NAME);
    }

    #[rstest]
    #[case(MetaTxKind::Erc20)]
    #[case(MetaTxKind::Erc777)]
    fn typed_meta_tx_is_recovered(#[case] kind: MetaTxKind) {
        let domain = Domain::new(1, random_address());
        let tx = transfer(kind);
        let signed = sign_meta_tx(&signing_account(), &domain, &tx).unwrap();
        assert_eq!(signed.digest, tx.signing_hash(&domain));
        assert_eq!(
            recover_meta_tx_signer(&signed.to_bytes(), &domain, &tx).unwrap(),
            SIGNING_ACCOUNT_ADDRESS
        );
    }

    #[test]
    fn kinds_are_not_interchangeable() {
        let domain = Domain::new(1, random_address());
        let tx = transfer(MetaTxKind::Erc20);
        let signed = sign_meta_tx(&signing_account(), &domain, &tx).unwrap();
        let as_777 = MetaTransaction {
            kind: MetaTxKind::Erc777,
            ..tx
        };
        assert_ne!(
            recover_meta_tx_signer(&signed.to_bytes(), &domain, &as_777).unwrap(),
            SIGNING_ACCOUNT_ADDRESS
        );
    }

    #[test]
    fn basic_hash_layout() {
        let token = random_address();
        let tx = transfer(MetaTxKind::Erc20);
        assert_eq!(keccak256(&tx.data), EMPTY_DATA_HASH);

        let mut packed = Vec::new();
        packed.extend_from_slice(token.as_slice());
        packed.extend_from_slice(keccak256(ERC20_META_TX_TYPE).as_slice());
        packed.extend_from_slice(tx.from.as_slice());
        packed.extend_from_slice(tx.to.as_slice());
        packed.extend_from_slice(&tx.amount.to_be_bytes::<32>());
        packed.extend_from_slice(EMPTY_DATA_HASH.as_slice());
        for param in tx.params() {
            packed.extend_from_slice(&param.to_be_bytes::<32>());
        }
        packed.extend_from_slice(tx.relayer.as_slice());
        assert_eq!(basic_signature_hash(token, &tx), keccak256(&packed));
    }

    #[test]
    fn basic_signature_is_recovered() {
        let token = random_address();
        let tx = MetaTransaction {
            data: bytes!("a9059cbb"),
            ..transfer(MetaTxKind::Erc777)
        };
        let signed = sign_basic_meta_tx(&signing_account(), token, &tx).unwrap();
        assert_eq!(
            recover_basic_meta_tx_signer(&signed.to_bytes(), token, &tx).unwrap(),
            SIGNING_ACCOUNT_ADDRESS
        );
        // Bound to the token contract.
        assert_ne!(
            recover_basic_meta_tx_signer(&signed.to_bytes(), random_address(), &tx).unwrap(),
            SIGNING_ACCOUNT_ADDRESS
        );
    }

    #[test]
    fn signing_on_behalf_recovers_the_actual_signer() {
        let domain = Domain::new(1, random_address());
        let tx = transfer(MetaTxKind::Erc20);
        let signed = sign_meta_tx(&other_signer(), &domain, &tx).unwrap();
        let recovered = recover_meta_tx_signer(&signed.to_bytes(), &domain, &tx).unwrap();
        assert_eq!(recovered, OTHER_SIGNER_ADDRESS);
        assert_ne!(recovered, tx.from);
    }

    #[test]
    fn approval_round_trip() {
        let domain = Domain::new(1, random_address());
        let approval = Approval {
            from: SIGNING_ACCOUNT_ADDRESS,
            message_id: U256::from(1),
            target: random_address(),
            amount: U256::from(100),
        };
        let signed = sign_approval(&signing_account(), &domain, &approval).unwrap();
        assert_eq!(
            recover_approval_signer(&signed.to_bytes(), &domain, &approval).unwrap(),
            SIGNING_ACCOUNT_ADDRESS
        );
        let replayed = Approval {
            message_id: U256::from(2),
            ..approval
        };
        assert_ne!(
            recover_approval_signer(&signed.to_bytes(), &domain, &replayed).unwrap(),
            SIGNING_ACCOUNT_ADDRESS
        );
        assert_ne!(approval.struct_hash(), replayed.struct_hash());
    }
}
