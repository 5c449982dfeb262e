//! Definition parsing for chainkit.toml files
//!
//! A [`Manifest`] is the unvalidated content of a single definition file.
//! Manifests from the project file and the local override file are merged
//! before the resolver validates them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::network::AccountKind;
use crate::{Error, Result};

const BUILTIN_PROFILE: &str = include_str!("default_profile.toml");

fn default_runs() -> i64 {
    200
}

/// Optimizer section of a compiler entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerDef {
    #[serde(default)]
    pub enabled: bool,

    /// Signed so that zero and negative values reach validation and are
    /// reported against their field instead of failing deserialization
    #[serde(default = "default_runs")]
    pub runs: i64,
}

impl Default for OptimizerDef {
    fn default() -> Self {
        Self {
            enabled: false,
            runs: default_runs(),
        }
    }
}

/// One `[[compilers]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerDef {
    pub version: String,

    #[serde(default)]
    pub optimizer: OptimizerDef,
}

/// Reference to a secret by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretRef {
    pub env: String,
}

/// Account source of a network, e.g. `accounts = { mnemonic = { env = "X" } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountsDef {
    Mnemonic(SecretRef),
    PrivateKeys(SecretRef),
}

impl AccountsDef {
    pub fn kind(&self) -> AccountKind {
        match self {
            AccountsDef::Mnemonic(_) => AccountKind::Mnemonic,
            AccountsDef::PrivateKeys(_) => AccountKind::PrivateKeys,
        }
    }

    pub fn secret(&self) -> &str {
        match self {
            AccountsDef::Mnemonic(secret) | AccountsDef::PrivateKeys(secret) => &secret.env,
        }
    }
}

/// One `[[networks]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkDef {
    pub name: String,

    /// Required for remote networks; local networks default to 31337
    #[serde(default)]
    pub chain_id: Option<i64>,

    /// RPC URL, may contain `${env.NAME}` placeholders
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub accounts: Option<AccountsDef>,

    /// In-process ephemeral chain: no URL, no secrets
    #[serde(default)]
    pub local: bool,
}

/// `[verification]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerificationDef {
    pub api_key: SecretRef,
}

/// Toolchain definition parsed from chainkit.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Network used when a command does not name one
    #[serde(default)]
    pub default_network: Option<String>,

    #[serde(default)]
    pub compilers: Vec<CompilerDef>,

    #[serde(default)]
    pub networks: Vec<NetworkDef>,

    #[serde(default)]
    pub verification: Option<VerificationDef>,
}

impl Manifest {
    /// Parse a manifest from TOML content
    ///
    /// Fails on TOML syntax errors and on network names repeated within
    /// this one file.
    ///
    /// # Example
    ///
    /// ```
    /// use chainkit_config::config::Manifest;
    ///
    /// let manifest = Manifest::parse(r#"
    /// [[compilers]]
    /// version = "0.8.4"
    /// optimizer = { enabled = true, runs = 999999 }
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.compilers[0].optimizer.runs, 999999);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        manifest.check_unique_networks()?;
        Ok(manifest)
    }

    /// The profile shipped with chainkit
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_PROFILE)
    }

    /// Fail on the first network name that appears twice.
    ///
    /// Names are compared the way profiles are named, with surrounding
    /// whitespace removed.
    pub fn check_unique_networks(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for network in &self.networks {
            if !seen.insert(network.name.trim()) {
                return Err(Error::DuplicateNetwork {
                    name: network.name.trim().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge an override manifest into this one
    ///
    /// `other` takes precedence:
    /// - `compilers`: a non-empty list replaces the base list
    /// - `networks`: same-named entries are replaced in place, new ones appended
    /// - `default_network`, `verification`: replaced when set
    pub fn merge(&mut self, other: &Manifest) {
        if other.default_network.is_some() {
            self.default_network = other.default_network.clone();
        }

        if !other.compilers.is_empty() {
            self.compilers = other.compilers.clone();
        }

        for network in &other.networks {
            let name = network.name.trim();
            if let Some(existing) = self.networks.iter_mut().find(|n| n.name.trim() == name) {
                tracing::debug!(network = %network.name, "Overriding network definition");
                *existing = network.clone();
            } else {
                self.networks.push(network.clone());
            }
        }

        if other.verification.is_some() {
            self.verification = other.verification.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn builtin_profile_parses() {
        let manifest = Manifest::builtin().unwrap();
        assert_eq!(manifest.default_network.as_deref(), Some("default-local"));
        assert_eq!(manifest.compilers.len(), 1);
        assert_eq!(manifest.compilers[0].version, "0.8.4");
        assert_eq!(
            manifest.compilers[0].optimizer,
            OptimizerDef {
                enabled: true,
                runs: 999_999
            }
        );

        let names: Vec<_> = manifest.networks.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["default-local", "ropsten", "bsc-testnet"]);
        assert_eq!(
            manifest.networks[2].accounts,
            Some(AccountsDef::PrivateKeys(SecretRef {
                env: "TESTNET_PRIVATE_KEY".into()
            }))
        );
    }

    #[test]
    fn optimizer_defaults_apply() {
        let manifest = Manifest::parse(
            r#"
[[compilers]]
version = "0.7.6"
"#,
        )
        .unwrap();
        assert_eq!(manifest.compilers[0].optimizer, OptimizerDef::default());
        assert_eq!(manifest.compilers[0].optimizer.runs, 200);
    }

    #[test]
    fn duplicate_network_in_one_file_is_rejected() {
        let err = Manifest::parse(
            r#"
[[networks]]
name = "ropsten"
chain_id = 3

[[networks]]
name = "ropsten"
chain_id = 4
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateNetwork { ref name } if name == "ropsten"));
    }

    #[test]
    fn unknown_network_fields_are_rejected() {
        let err = Manifest::parse(
            r#"
[[networks]]
name = "ropsten"
chainId = 3
"#,
        )
        .unwrap_err();
        assert!(err.is_structural());
    }

    #[rstest]
    #[case::misspelled_default("default_netwrk = \"ropsten\"\n")]
    #[case::misspelled_section("[verificaton]\napi_key = { env = \"KEY\" }\n")]
    fn unknown_top_level_keys_are_rejected(#[case] content: &str) {
        let err = Manifest::parse(content).unwrap_err();
        assert!(err.is_structural(), "expected structural error, got {err}");
    }

    #[test]
    fn names_differing_in_surrounding_whitespace_are_duplicates() {
        let err = Manifest::parse(
            r#"
[[networks]]
name = "staging"
chain_id = 5

[[networks]]
name = "staging "
chain_id = 6
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateNetwork { ref name } if name == "staging"));
    }

    #[test]
    fn merge_matches_names_ignoring_surrounding_whitespace() {
        let mut base = Manifest::builtin().unwrap();
        let overlay = Manifest::parse(
            r#"
[[networks]]
name = " ropsten"
chain_id = 3
url = "http://127.0.0.1:8545"
accounts = { private_keys = { env = "LOCAL_KEY" } }
"#,
        )
        .unwrap();

        base.merge(&overlay);

        assert_eq!(base.networks.len(), 3);
        assert_eq!(base.networks[1].url.as_deref(), Some("http://127.0.0.1:8545"));
        assert!(base.check_unique_networks().is_ok());
    }

    #[test]
    fn merge_replaces_networks_by_name_and_appends_new() {
        let mut base = Manifest::builtin().unwrap();
        let overlay = Manifest::parse(
            r#"
default_network = "sepolia"

[[networks]]
name = "ropsten"
chain_id = 3
url = "http://127.0.0.1:8545"
accounts = { private_keys = { env = "LOCAL_KEY" } }

[[networks]]
name = "sepolia"
chain_id = 11155111
url = "https://rpc.sepolia.org"
accounts = { mnemonic = { env = "SEPOLIA_MNEMONIC" } }
"#,
        )
        .unwrap();

        base.merge(&overlay);

        let names: Vec<_> = base.networks.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["default-local", "ropsten", "bsc-testnet", "sepolia"]);
        assert_eq!(base.networks[1].url.as_deref(), Some("http://127.0.0.1:8545"));
        assert_eq!(base.default_network.as_deref(), Some("sepolia"));
        // Empty overlay compiler list keeps the base compilers
        assert_eq!(base.compilers.len(), 1);
        assert!(base.verification.is_some());
    }
}
