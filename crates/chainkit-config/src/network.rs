//! Network profiles and their credentials
//!
//! A [`NetworkProfile`] is built even when its secrets are missing. The
//! problem is stored on the profile and raised by [`NetworkProfile::endpoint`]
//! or [`NetworkProfile::account_source`], so one broken remote network never
//! blocks local work or other networks.

use std::fmt;
use std::sync::LazyLock;

use alloy_signer_local::coins_bip39::{English, Mnemonic as Bip39Mnemonic};
use regex::Regex;
use url::Url;

use crate::secret::{self, SecretStore};
use crate::{Error, Result};

/// Name of the in-process development network
pub const LOCAL_NETWORK: &str = "default-local";

/// Chain id served by the in-process development network
pub const LOCAL_CHAIN_ID: u64 = 31337;

/// Public development mnemonic used by the in-process network.
///
/// Not a secret: every local development chain ships with it.
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{env\.([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// A hex-encoded secp256k1 private key
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Parse 32 bytes of hex, with or without a `0x` prefix.
    pub fn from_hex(raw: &str) -> std::result::Result<Self, String> {
        let digits = raw.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        let bytes = hex::decode(digits).map_err(|e| format!("private key is not hex: {e}"))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| format!("private key must be 32 bytes, got {}", b.len()))?;
        // Zero and values at or above the curve order are not signing keys
        k256::SecretKey::from_slice(&bytes)
            .map_err(|_| "private key is outside the secp256k1 scalar range".to_string())?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// A BIP-39 phrase
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic(String);

impl Mnemonic {
    /// Collapse whitespace, then check the words and checksum against the
    /// English BIP-39 wordlist.
    ///
    /// Case is kept as written: the phrase is the seed password.
    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        let words: Vec<&str> = raw.split_whitespace().collect();
        if ![12, 15, 18, 21, 24].contains(&words.len()) {
            return Err(format!(
                "mnemonic must have 12, 15, 18, 21 or 24 words, got {}",
                words.len()
            ));
        }
        let phrase = words.join(" ");
        Bip39Mnemonic::<English>::new_from_phrase(&phrase)
            .map_err(|e| format!("mnemonic is not a valid BIP-39 phrase: {e}"))?;
        Ok(Self(phrase))
    }

    pub fn phrase(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mnemonic(<redacted>)")
    }
}

/// Where a network's signing accounts come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSource {
    Mnemonic(Mnemonic),
    PrivateKeys(Vec<PrivateKey>),
}

impl AccountSource {
    pub fn kind(&self) -> AccountKind {
        match self {
            AccountSource::Mnemonic(_) => AccountKind::Mnemonic,
            AccountSource::PrivateKeys(_) => AccountKind::PrivateKeys,
        }
    }
}

/// Which variant of [`AccountSource`] a definition asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Mnemonic,
    PrivateKeys,
}

impl AccountKind {
    /// Turn a raw secret value into an account source.
    ///
    /// Private key lists are comma separated; blank entries are skipped.
    pub fn parse(self, raw: &str) -> std::result::Result<AccountSource, String> {
        match self {
            AccountKind::Mnemonic => Mnemonic::parse(raw).map(AccountSource::Mnemonic),
            AccountKind::PrivateKeys => {
                let keys = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .enumerate()
                    .map(|(i, k)| PrivateKey::from_hex(k).map_err(|e| format!("key {i}: {e}")))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                if keys.is_empty() {
                    return Err("no private keys listed".to_string());
                }
                Ok(AccountSource::PrivateKeys(keys))
            }
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Mnemonic => f.write_str("mnemonic"),
            AccountKind::PrivateKeys => f.write_str("private-keys"),
        }
    }
}

/// Credential state recorded at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Resolved(AccountSource),
    /// The named secret was absent or empty
    Missing { secret: String },
    /// The named secret was present but could not be parsed
    Invalid { secret: String, reason: String },
}

/// RPC endpoint of a network
#[derive(Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Ephemeral chain run inside the toolchain process
    InProcess,
    /// Remote node; `template` is the URL as written, before secrets were substituted
    Remote { url: Url, template: String },
    /// The URL template references a secret that is not set
    Unresolved { template: String, secret: String },
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::InProcess => f.write_str("InProcess"),
            Endpoint::Remote { template, .. } => f.debug_tuple("Remote").field(template).finish(),
            Endpoint::Unresolved { template, secret } => f
                .debug_struct("Unresolved")
                .field("template", template)
                .field("secret", secret)
                .finish(),
        }
    }
}

/// A named deployment target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    pub(crate) name: String,
    pub(crate) chain_id: u64,
    pub(crate) endpoint: Endpoint,
    pub(crate) credentials: Credentials,
}

impl NetworkProfile {
    /// The in-process development network, which needs no secrets
    pub fn local(name: impl Into<String>, chain_id: u64) -> Self {
        Self {
            name: name.into(),
            chain_id,
            endpoint: Endpoint::InProcess,
            credentials: Credentials::Resolved(AccountSource::Mnemonic(Mnemonic(
                DEV_MNEMONIC.to_string(),
            ))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn is_local(&self) -> bool {
        matches!(self.endpoint, Endpoint::InProcess)
    }

    /// Raw credential state, for reporting
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Raw endpoint state, for reporting
    pub fn endpoint_state(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The endpoint, or the deferred error if its URL could not be resolved
    pub fn endpoint(&self) -> Result<&Endpoint> {
        match &self.endpoint {
            Endpoint::Unresolved { secret, .. } => Err(Error::MissingCredential {
                network: self.name.clone(),
                secret: secret.clone(),
            }),
            endpoint => Ok(endpoint),
        }
    }

    /// The signing accounts, or the deferred error recorded at load time
    pub fn account_source(&self) -> Result<&AccountSource> {
        match &self.credentials {
            Credentials::Resolved(source) => Ok(source),
            Credentials::Missing { secret } => Err(Error::MissingCredential {
                network: self.name.clone(),
                secret: secret.clone(),
            }),
            Credentials::Invalid { secret, reason } => Err(Error::InvalidCredential {
                network: self.name.clone(),
                secret: secret.clone(),
                reason: reason.clone(),
            }),
        }
    }

    /// First deferred problem with this network, if any
    pub fn check(&self) -> Result<()> {
        self.endpoint()?;
        self.account_source()?;
        Ok(())
    }

    /// Whether credentialed use of this network can succeed
    pub fn is_usable(&self) -> bool {
        self.check().is_ok()
    }
}

/// Outcome of substituting `${env.NAME}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Interpolated {
    Complete(String),
    Missing(String),
}

/// Substitute `${env.NAME}` placeholders in `template` from `store`.
///
/// Stops at the first placeholder whose secret is not provided.
pub(crate) fn interpolate(template: &str, store: &dyn SecretStore) -> Interpolated {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in ENV_PLACEHOLDER.captures_iter(template) {
        let whole = caps.get(0).expect("capture 0 is the whole match");
        let name = &caps[1];
        let Some(value) = secret::lookup(store, name) else {
            return Interpolated::Missing(name.to_string());
        };
        out.push_str(&template[last..whole.start()]);
        out.push_str(&value);
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Interpolated::Complete(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::MemorySecretStore;
    use pretty_assertions::assert_eq;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    /// secp256k1 group order
    const CURVE_ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

    #[test]
    fn private_key_accepts_optional_prefix() {
        let with = PrivateKey::from_hex(KEY).unwrap();
        let without = PrivateKey::from_hex(&KEY[2..]).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn private_key_rejects_wrong_length_and_out_of_range() {
        assert!(PrivateKey::from_hex("0xdeadbeef").is_err());
        assert!(PrivateKey::from_hex("zz").is_err());
        assert!(PrivateKey::from_hex(&"00".repeat(32)).is_err());
        assert!(PrivateKey::from_hex(&"ff".repeat(32)).is_err());
        assert!(PrivateKey::from_hex(CURVE_ORDER).is_err());
    }

    #[test]
    fn private_key_accepts_largest_scalar() {
        // n - 1
        let key = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140";
        assert!(PrivateKey::from_hex(key).is_ok());
    }

    #[test]
    fn secrets_are_redacted_in_debug() {
        let source = AccountKind::PrivateKeys.parse(KEY).unwrap();
        let debug = format!("{source:?}");
        assert!(!debug.contains("ac0974"), "{debug}");

        let mnemonic = AccountKind::Mnemonic.parse(DEV_MNEMONIC).unwrap();
        assert!(!format!("{mnemonic:?}").contains("junk"));
    }

    #[test]
    fn private_key_list_keeps_order() {
        let second = format!("0x{}", "11".repeat(32));
        let raw = format!("{KEY}, {second},");
        let AccountSource::PrivateKeys(keys) = AccountKind::PrivateKeys.parse(&raw).unwrap() else {
            panic!("expected private keys");
        };
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1].as_bytes(), &[0x11; 32]);
    }

    #[test]
    fn mnemonic_word_count_is_checked() {
        assert!(AccountKind::Mnemonic.parse("one two three").is_err());
        let parsed = AccountKind::Mnemonic
            .parse("  test test test test test test test test test test test   junk ")
            .unwrap();
        assert_eq!(parsed, AccountSource::Mnemonic(Mnemonic(DEV_MNEMONIC.into())));
    }

    #[test]
    fn mnemonic_is_not_case_folded() {
        // Folding would silently derive a different seed
        let shouted = "TEST test test test test test test test test test test junk";
        assert!(Mnemonic::parse(shouted).is_err());
    }

    #[test]
    fn mnemonic_checksum_is_checked() {
        let phrase = ["abandon"; 12].join(" ");
        let err = AccountKind::Mnemonic.parse(&phrase).unwrap_err();
        assert!(err.contains("BIP-39"));
    }

    #[test]
    fn interpolate_substitutes_every_placeholder() {
        let store = MemorySecretStore::from([("HOST", "node.example"), ("KEY", "abc")]);
        assert_eq!(
            interpolate("https://${env.HOST}/v2/${env.KEY}", &store),
            Interpolated::Complete("https://node.example/v2/abc".into())
        );
        assert_eq!(
            interpolate("https://plain.example/", &store),
            Interpolated::Complete("https://plain.example/".into())
        );
    }

    #[test]
    fn interpolate_reports_missing_secret() {
        let store = MemorySecretStore::from([("KEY", "  ")]);
        assert_eq!(
            interpolate("https://x/${env.KEY}", &store),
            Interpolated::Missing("KEY".into())
        );
    }

    #[test]
    fn missing_credentials_surface_on_use() {
        let profile = NetworkProfile {
            name: "ropsten".into(),
            chain_id: 3,
            endpoint: Endpoint::Unresolved {
                template: "https://x/${env.ALCHEMY_API_KEY}".into(),
                secret: "ALCHEMY_API_KEY".into(),
            },
            credentials: Credentials::Missing {
                secret: "TESTNET_MNEMONIC".into(),
            },
        };

        assert!(!profile.is_usable());
        let err = profile.account_source().unwrap_err();
        match err {
            Error::MissingCredential { secret, .. } => assert_eq!(secret, "TESTNET_MNEMONIC"),
            other => panic!("expected MissingCredential, got {other:?}"),
        }
        let err = profile.endpoint().unwrap_err();
        assert!(err.to_string().contains("ALCHEMY_API_KEY"));
    }

    #[test]
    fn local_network_is_always_usable() {
        let profile = NetworkProfile::local(LOCAL_NETWORK, LOCAL_CHAIN_ID);
        assert!(profile.is_local());
        assert!(profile.is_usable());
        assert_eq!(profile.account_source().unwrap().kind(), AccountKind::Mnemonic);
    }
}
