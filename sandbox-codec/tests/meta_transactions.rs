//! Sand transfers relayed on behalf of a holder.
use alloy::primitives::{bytes, Address, U256};
use anyhow::Result;
use sandbox_codec::{
    meta_tx::{
        recover_approval_signer, recover_basic_meta_tx_signer, recover_meta_tx_signer,
        sign_approval, sign_basic_meta_tx, sign_meta_tx, Approval,
    },
    Domain, MetaTransaction, MetaTxKind, SigningConfig,
};
use envconfig::Envconfig;
use sandbox_test::{
    accounts::{signing_account, SIGNING_ACCOUNT_ADDRESS, SIGNING_ACCOUNT_KEY},
    utils::random_address,
};
use std::collections::HashMap;
use test_log::test;

fn relayed_call(kind: MetaTxKind, receiver: Address) -> MetaTransaction {
    MetaTransaction {
        kind,
        from: SIGNING_ACCOUNT_ADDRESS,
        to: receiver,
        amount: U256::from(150),
        data: bytes!("dd62ed3e"),
        nonce: U256::from(1),
        gas_price: U256::from(1),
        gas_limit: U256::from(2_000_000),
        token_gas_price: U256::from(1),
        relayer: Address::ZERO,
    }
}

#[test]
fn holder_signs_through_the_environment_config() -> Result<()> {
    let sand = random_address();
    let vars = HashMap::from([
        ("SANDBOX_CHAIN_ID".to_string(), "1".to_string()),
        ("SANDBOX_VERIFYING_CONTRACT".to_string(), sand.to_string()),
        ("SANDBOX_PRIVATE_KEY".to_string(), SIGNING_ACCOUNT_KEY.to_string()),
    ]);
    let cfg = SigningConfig::init_from_hashmap(&vars)?;
    let signer = cfg.signer()?.expect("key is configured");
    let domain = cfg.domain();

    for kind in [MetaTxKind::Erc20, MetaTxKind::Erc777] {
        let tx = relayed_call(kind, random_address());
        let typed = sign_meta_tx(&signer, &domain, &tx)?;
        assert_eq!(
            recover_meta_tx_signer(&typed.to_bytes(), &domain, &tx)?,
            SIGNING_ACCOUNT_ADDRESS
        );
        let basic = sign_basic_meta_tx(&signer, sand, &tx)?;
        assert_eq!(
            recover_basic_meta_tx_signer(&basic.to_bytes(), sand, &tx)?,
            SIGNING_ACCOUNT_ADDRESS
        );
        assert_ne!(typed.signature, basic.signature);
    }
    Ok(())
}

#[test]
fn nonce_is_part_of_every_signature() -> Result<()> {
    let sand = random_address();
    let domain = Domain::new(1, sand);
    let tx = relayed_call(MetaTxKind::Erc20, random_address());
    let next = MetaTransaction {
        nonce: U256::from(2),
        ..tx.clone()
    };

    let typed = sign_meta_tx(&signing_account(), &domain, &tx)?;
    assert_ne!(
        recover_meta_tx_signer(&typed.to_bytes(), &domain, &next)?,
        SIGNING_ACCOUNT_ADDRESS
    );
    let basic = sign_basic_meta_tx(&signing_account(), sand, &tx)?;
    assert_ne!(
        recover_basic_meta_tx_signer(&basic.to_bytes(), sand, &next)?,
        SIGNING_ACCOUNT_ADDRESS
    );
    Ok(())
}

#[test]
fn pre_approval() -> Result<()> {
    let domain = Domain::new(1, random_address());
    let approval = Approval {
        from: SIGNING_ACCOUNT_ADDRESS,
        message_id: U256::from(1),
        target: random_address(),
        amount: U256::from(1_000_000),
    };
    let signed = sign_approval(&signing_account(), &domain, &approval)?;
    assert_eq!(
        recover_approval_signer(&signed.to_bytes(), &domain, &approval)?,
        SIGNING_ACCOUNT_ADDRESS
    );
    Ok(())
}
