use alloy::{
    primitives::{Address, B256},
    signers::local::PrivateKeySigner,
};
use envconfig::Envconfig;

use crate::{eip712::Domain, error::SignatureError, signer::signer_from_hex};

/// Signing parameters read from the environment.
#[derive(Envconfig, Clone)]
pub struct SigningConfig {
    #[envconfig(from = "SANDBOX_CHAIN_ID", default = "1")]
    pub chain_id: u64,

    #[envconfig(
        from = "SANDBOX_VERIFYING_CONTRACT",
        default = "0x0000000000000000000000000000000000000000"
    )]
    pub verifying_contract: Address,

    #[envconfig(from = "SANDBOX_DOMAIN_NAME", default = "The Sandbox 3D")]
    pub domain_name: String,

    #[envconfig(from = "SANDBOX_DOMAIN_VERSION", default = "1")]
    pub domain_version: String,

    #[envconfig(from = "SANDBOX_DOMAIN_SALT")]
    pub domain_salt: Option<B256>,

    #[envconfig(from = "SANDBOX_PRIVATE_KEY")]
    pub private_key: Option<String>,
}

impl SigningConfig {
    pub fn domain(&self) -> Domain {
        let domain = Domain::new(self.chain_id, self.verifying_contract)
            .with_name(self.domain_name.clone())
            .with_version(self.domain_version.clone());
        match self.domain_salt {
            Some(salt) => domain.with_salt(salt),
            None => domain,
        }
    }

    /// The configured signer, if a key is set.
    pub fn signer(&self) -> Result<Option<PrivateKeySigner>, SignatureError> {
        self.private_key.as_deref().map(signer_from_hex).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eip712::{ASSET_DOMAIN_SALT, SANDBOX_DOMAIN_NAME};
    use sandbox_test::accounts::{OTHER_SIGNER_ADDRESS, OTHER_SIGNER_KEY};
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() -> anyhow::Result<()> {
        let cfg = SigningConfig::init_from_hashmap(&HashMap::new())?;
        assert_eq!(cfg.domain(), Domain::new(1, Address::ZERO));
        assert_eq!(cfg.domain().name, SANDBOX_DOMAIN_NAME);
        assert!(cfg.signer()?.is_none());
        Ok(())
    }

    #[test]
    fn overrides() -> anyhow::Result<()> {
        let salt = ASSET_DOMAIN_SALT.to_string();
        let cfg = SigningConfig::init_from_hashmap(&vars(&[
            ("SANDBOX_CHAIN_ID", "1337"),
            (
                "SANDBOX_VERIFYING_CONTRACT",
                "0x61c461EcC993aCDeAbDD52Ed2fDB17A3C4ccF0c4",
            ),
            ("SANDBOX_DOMAIN_SALT", salt.as_str()),
            ("SANDBOX_PRIVATE_KEY", OTHER_SIGNER_KEY),
        ]))?;
        let domain = cfg.domain();
        assert_eq!(domain.chain_id, 1337);
        assert_eq!(domain.salt, Some(ASSET_DOMAIN_SALT));
        assert_eq!(
            cfg.signer()?.map(|s| s.address()),
            Some(OTHER_SIGNER_ADDRESS)
        );
        Ok(())
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(
            SigningConfig::init_from_hashmap(&vars(&[("SANDBOX_CHAIN_ID", "mainnet")])).is_err()
        );
        let cfg =
            SigningConfig::init_from_hashmap(&vars(&[("SANDBOX_PRIVATE_KEY", "0x00")])).unwrap();
        assert!(cfg.signer().is_err());
    }
}
