//! Redacted configuration summary
//!
//! `ConfigSummary` turns an assembled [`Configuration`] into a serializable
//! view for reports and scripting. Secret values never appear in it; only
//! the names of the secrets and whether they resolved.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::resolver::Configuration;
use crate::network::{Credentials, Endpoint, NetworkProfile};

/// Resolution status of a network or credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ready,
    Missing,
    Invalid,
}

/// One compiler entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSummary {
    pub version: String,
    pub optimizer_enabled: bool,
    pub optimizer_runs: u32,
}

/// One network entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub name: String,
    pub chain_id: u64,
    /// URL as written in the definition, or `in-process`
    pub url: String,
    /// `mnemonic`, `private-keys` or `development`
    pub accounts: String,
    /// Secret names the network depends on
    pub secrets: Vec<String>,
    pub status: Status,
    /// Why the network is not ready
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

/// Verification credential entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub secret: String,
    pub status: Status,
}

/// Serializable view of a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub default_network: String,
    pub compilers: Vec<CompilerSummary>,
    pub networks: Vec<NetworkSummary>,
    pub verification: VerificationSummary,
}

impl ConfigSummary {
    pub fn from_configuration(config: &Configuration) -> Self {
        let compilers = config
            .compilers()
            .iter()
            .map(|c| CompilerSummary {
                version: c.version.to_string(),
                optimizer_enabled: c.optimizer.enabled,
                optimizer_runs: c.optimizer.runs,
            })
            .collect();

        let networks = config.networks().iter().map(summarize_network).collect();

        let verification = VerificationSummary {
            secret: config.verification().secret().to_string(),
            status: if config.verification().is_configured() {
                Status::Ready
            } else {
                Status::Missing
            },
        };

        Self {
            default_network: config.default_network().name().to_string(),
            compilers,
            networks,
            verification,
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Networks that cannot be used until a secret is fixed
    pub fn unusable_networks(&self) -> impl Iterator<Item = &NetworkSummary> {
        self.networks.iter().filter(|n| n.status != Status::Ready)
    }
}

fn summarize_network(profile: &NetworkProfile) -> NetworkSummary {
    let mut secrets = Vec::new();

    let url = match profile.endpoint_state() {
        Endpoint::InProcess => "in-process".to_string(),
        Endpoint::Remote { template, .. } => template.clone(),
        Endpoint::Unresolved { template, secret } => {
            secrets.push(secret.clone());
            template.clone()
        }
    };

    let accounts = if profile.is_local() {
        "development".to_string()
    } else {
        match profile.credentials() {
            Credentials::Resolved(source) => source.kind().to_string(),
            Credentials::Missing { secret } | Credentials::Invalid { secret, .. } => {
                secrets.push(secret.clone());
                "unresolved".to_string()
            }
        }
    };

    let (status, problem) = match profile.check() {
        Ok(()) => (Status::Ready, None),
        Err(e @ crate::Error::InvalidCredential { .. }) => (Status::Invalid, Some(e.to_string())),
        Err(e) => (Status::Missing, Some(e.to_string())),
    };

    NetworkSummary {
        name: profile.name().to_string(),
        chain_id: profile.chain_id(),
        url,
        accounts,
        secrets,
        status,
        problem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigResolver;
    use crate::secret::MemorySecretStore;

    #[test]
    fn summary_reports_missing_secrets_by_name() {
        let config = ConfigResolver::builtin()
            .unwrap()
            .assemble(&MemorySecretStore::new())
            .unwrap();
        let summary = ConfigSummary::from_configuration(&config);

        assert_eq!(summary.default_network, "default-local");
        assert_eq!(summary.compilers[0].version, "0.8.4");
        assert_eq!(summary.compilers[0].optimizer_runs, 999_999);

        let unusable: Vec<_> = summary.unusable_networks().map(|n| n.name.as_str()).collect();
        assert_eq!(unusable, vec!["ropsten", "bsc-testnet"]);

        let ropsten = &summary.networks[1];
        assert_eq!(ropsten.status, Status::Missing);
        assert!(ropsten.secrets.contains(&"ALCHEMY_API_KEY".to_string()));
        assert!(ropsten.secrets.contains(&"TESTNET_MNEMONIC".to_string()));
        assert_eq!(summary.verification.status, Status::Missing);
    }

    #[test]
    fn summary_never_contains_secret_values() {
        let store = MemorySecretStore::from([
            ("ALCHEMY_API_KEY", "alchemy-secret-value"),
            (
                "TESTNET_PRIVATE_KEY",
                "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
            ),
            ("ETHERSCAN_API_KEY", "etherscan-secret-value"),
        ]);
        let config = ConfigResolver::builtin().unwrap().assemble(&store).unwrap();
        let json = ConfigSummary::from_configuration(&config).to_json().to_string();

        assert!(!json.contains("alchemy-secret-value"));
        assert!(!json.contains("etherscan-secret-value"));
        assert!(!json.contains("59c6995e"));
        assert!(json.contains("${env.ALCHEMY_API_KEY}"));
        assert_eq!(
            ConfigSummary::from_configuration(&config).verification.status,
            Status::Ready
        );
    }
}
