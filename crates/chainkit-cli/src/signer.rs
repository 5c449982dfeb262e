//! Local signer enumeration
//!
//! Derives signer addresses from a network's account source without talking
//! to a node: path `m/44'/60'/0'/0/i` for mnemonics, and the keys themselves
//! for private-key lists. Nothing here signs.

use alloy_signer_local::coins_bip39::English;
use alloy_signer_local::{MnemonicBuilder, PrivateKeySigner};
use async_trait::async_trait;
use chainkit_config::{
    AccountSource, Address, Error, NetworkProfile, PrivateKey, Result, SignerEnumerator,
};

/// Accounts derived per mnemonic
pub const DEFAULT_ACCOUNT_COUNT: u32 = 20;

/// Enumerates signers from the credentials recorded on a network profile
#[derive(Debug, Clone, Copy)]
pub struct LocalSigners {
    account_count: u32,
}

impl LocalSigners {
    pub fn new(account_count: u32) -> Self {
        Self { account_count }
    }
}

impl Default for LocalSigners {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT_COUNT)
    }
}

#[async_trait]
impl SignerEnumerator for LocalSigners {
    async fn signers(&self, network: &NetworkProfile) -> Result<Vec<Address>> {
        let derived = match network.account_source()? {
            AccountSource::Mnemonic(mnemonic) => {
                mnemonic_addresses(mnemonic.phrase(), "", self.account_count)
            }
            AccountSource::PrivateKeys(keys) => keys.iter().map(key_address).collect(),
        };
        derived.map_err(|message| Error::SignerEnumeration {
            network: network.name().to_string(),
            message,
        })
    }
}

/// First `count` addresses on the standard derivation path
pub fn mnemonic_addresses(
    phrase: &str,
    passphrase: &str,
    count: u32,
) -> std::result::Result<Vec<Address>, String> {
    (0..count)
        .map(|index| {
            let signer = MnemonicBuilder::<English>::default()
                .phrase(phrase)
                .password(passphrase)
                .index(index)
                .and_then(|builder| builder.build())
                .map_err(|e| format!("account {index}: {e}"))?;
            Ok(signer.address())
        })
        .collect()
}

/// Address controlled by a raw private key
pub fn key_address(key: &PrivateKey) -> std::result::Result<Address, String> {
    PrivateKeySigner::from_slice(key.as_bytes())
        .map(|signer| signer.address())
        .map_err(|_| "private key is not a valid secp256k1 scalar".to_string())
}
