//! Configuration resolution
//!
//! The `ConfigResolver` validates a merged [`Manifest`], resolves secrets and
//! assembles the immutable [`Configuration`] read by every downstream step.

use std::fs;
use std::path::Path;

use url::Url;

use super::manifest::{Manifest, NetworkDef};
use crate::compiler::{self, CompilerProfile, CompilerSpec, OptimizerSettings};
use crate::network::{
    self, Credentials, Endpoint, Interpolated, LOCAL_CHAIN_ID, LOCAL_NETWORK, NetworkProfile,
};
use crate::secret::{self, SecretStore};
use crate::verification::{DEFAULT_VERIFICATION_SECRET, VerificationCredential};
use crate::{Error, Result};

/// Project definition file, looked up in the project root
pub const PROJECT_FILE: &str = "chainkit.toml";

/// Untracked local overrides, merged on top of the project definition
pub const LOCAL_OVERRIDE_FILE: &str = "chainkit.local.toml";

const URL_SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];

/// The assembled configuration
///
/// Built once per process by [`ConfigResolver::assemble`] and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    compilers: CompilerProfile,
    networks: Vec<NetworkProfile>,
    default_network: String,
    verification: VerificationCredential,
}

impl Configuration {
    pub fn compilers(&self) -> &CompilerProfile {
        &self.compilers
    }

    /// Networks in definition order
    pub fn networks(&self) -> &[NetworkProfile] {
        &self.networks
    }

    pub fn network(&self, name: &str) -> Result<&NetworkProfile> {
        self.networks
            .iter()
            .find(|n| n.name() == name)
            .ok_or_else(|| Error::UnknownNetwork {
                name: name.to_string(),
            })
    }

    pub fn default_network(&self) -> &NetworkProfile {
        // assemble() guarantees the default network exists
        self.networks
            .iter()
            .find(|n| n.name() == self.default_network)
            .unwrap_or(&self.networks[0])
    }

    /// `name` if given, otherwise the default network
    pub fn select_network(&self, name: Option<&str>) -> Result<&NetworkProfile> {
        match name {
            Some(name) => self.network(name),
            None => Ok(self.default_network()),
        }
    }

    pub fn verification(&self) -> &VerificationCredential {
        &self.verification
    }
}

/// Resolves the toolchain configuration from a definition and a secret store
///
/// Definitions come from one of:
/// 1. `chainkit.toml` in the project root, or the built-in profile when absent
/// 2. `chainkit.local.toml` in the project root, merged on top when present
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    manifest: Manifest,
}

impl ConfigResolver {
    pub fn from_manifest(manifest: Manifest) -> Self {
        Self { manifest }
    }

    /// Resolver over the built-in profile only
    pub fn builtin() -> Result<Self> {
        Ok(Self::from_manifest(Manifest::builtin()?))
    }

    /// Read the definition layers found under `root`.
    ///
    /// Invalid TOML or a duplicated network name in any layer is an error.
    pub fn discover(root: &Path) -> Result<Self> {
        let project_path = root.join(PROJECT_FILE);
        let mut manifest = if project_path.is_file() {
            tracing::debug!(?project_path, "Loading project definition");
            Manifest::parse(&fs::read_to_string(&project_path)?)?
        } else {
            tracing::debug!(?project_path, "No project definition found, using built-in profile");
            Manifest::builtin()?
        };

        let local_path = root.join(LOCAL_OVERRIDE_FILE);
        if local_path.is_file() {
            tracing::debug!(?local_path, "Loading local overrides");
            let local = Manifest::parse(&fs::read_to_string(&local_path)?)?;
            manifest.merge(&local);
        }

        Ok(Self::from_manifest(manifest))
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Validate the compiler list.
    pub fn load_compiler_profile(&self) -> Result<CompilerProfile> {
        let compilers = self
            .manifest
            .compilers
            .iter()
            .enumerate()
            .map(|(i, def)| {
                Ok(CompilerSpec {
                    version: compiler::parse_version(
                        &format!("compilers[{i}].version"),
                        &def.version,
                    )?,
                    optimizer: OptimizerSettings {
                        enabled: def.optimizer.enabled,
                        runs: compiler::parse_runs(
                            &format!("compilers[{i}].optimizer.runs"),
                            def.optimizer.runs,
                        )?,
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;
        CompilerProfile::new(compilers)
    }

    /// Validate every network and resolve its secrets.
    ///
    /// Structural problems fail the whole call. Missing or unusable secrets
    /// are recorded on the affected profile only.
    pub fn load_network_profiles(&self, secrets: &dyn SecretStore) -> Result<Vec<NetworkProfile>> {
        self.manifest.check_unique_networks()?;

        let mut profiles = self
            .manifest
            .networks
            .iter()
            .enumerate()
            .map(|(i, def)| resolve_network(i, def, secrets))
            .collect::<Result<Vec<_>>>()?;

        if !profiles.iter().any(|p| p.name() == LOCAL_NETWORK) {
            profiles.insert(0, NetworkProfile::local(LOCAL_NETWORK, LOCAL_CHAIN_ID));
        }

        Ok(profiles)
    }

    /// Read the verification API key. Never fails; see [`VerificationCredential::api_key`].
    pub fn load_verification_credential(
        &self,
        secrets: &dyn SecretStore,
    ) -> VerificationCredential {
        let secret = self
            .manifest
            .verification
            .as_ref()
            .map(|v| v.api_key.env.as_str())
            .unwrap_or(DEFAULT_VERIFICATION_SECRET);
        let api_key = secret::lookup(secrets, secret);
        if api_key.is_none() {
            tracing::debug!(secret, "Verification API key not set");
        }
        VerificationCredential::new(secret, api_key)
    }

    /// Build the configuration, failing fast on structural errors.
    pub fn assemble(&self, secrets: &dyn SecretStore) -> Result<Configuration> {
        let compilers = self.load_compiler_profile()?;
        let networks = self.load_network_profiles(secrets)?;
        let verification = self.load_verification_credential(secrets);

        let default_network = self
            .manifest
            .default_network
            .clone()
            .unwrap_or_else(|| LOCAL_NETWORK.to_string());
        if !networks.iter().any(|n| n.name() == default_network) {
            return Err(Error::invalid(
                "default_network",
                format!("network '{default_network}' is not defined"),
            ));
        }

        tracing::debug!(
            compilers = compilers.len(),
            networks = networks.len(),
            %default_network,
            "Configuration assembled"
        );

        Ok(Configuration {
            compilers,
            networks,
            default_network,
            verification,
        })
    }
}

fn resolve_network(
    index: usize,
    def: &NetworkDef,
    secrets: &dyn SecretStore,
) -> Result<NetworkProfile> {
    let field = |name: &str| format!("networks[{index}].{name}");

    let name = def.name.trim();
    if name.is_empty() {
        return Err(Error::invalid(field("name"), "network name must not be empty"));
    }

    if def.local {
        if def.url.is_some() {
            return Err(Error::invalid(field("url"), "local networks have no URL"));
        }
        if def.accounts.is_some() {
            return Err(Error::invalid(
                field("accounts"),
                "local networks use development accounts",
            ));
        }
        let raw = def.chain_id.unwrap_or(LOCAL_CHAIN_ID as i64);
        let chain_id = parse_chain_id(&field("chain_id"), raw)?;
        return Ok(NetworkProfile::local(name, chain_id));
    }

    let chain_id = match def.chain_id {
        Some(raw) => parse_chain_id(&field("chain_id"), raw)?,
        None => return Err(Error::invalid(field("chain_id"), "remote networks need a chain id")),
    };

    let template = def
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| Error::invalid(field("url"), "remote networks need a URL"))?;

    let accounts = def
        .accounts
        .as_ref()
        .ok_or_else(|| {
            Error::invalid(field("accounts"), "remote networks need an account source")
        })?;
    if accounts.secret().trim().is_empty() {
        return Err(Error::invalid(field("accounts"), "secret name must not be empty"));
    }

    let endpoint = match network::interpolate(template, secrets) {
        Interpolated::Complete(resolved) => {
            let url = Url::parse(&resolved).map_err(|e| {
                Error::invalid(field("url"), format!("'{template}' is not a valid URL: {e}"))
            })?;
            if !URL_SCHEMES.contains(&url.scheme()) {
                return Err(Error::invalid(
                    field("url"),
                    format!("unsupported scheme '{}'", url.scheme()),
                ));
            }
            Endpoint::Remote {
                url,
                template: template.to_string(),
            }
        }
        Interpolated::Missing(secret) => {
            tracing::warn!(
                network = name,
                %secret,
                "URL secret not set; network unusable until provided"
            );
            Endpoint::Unresolved {
                template: template.to_string(),
                secret,
            }
        }
    };

    let secret = accounts.secret().to_string();
    let credentials = match secret::lookup(secrets, &secret) {
        None => {
            tracing::warn!(
                network = name,
                %secret,
                "Credential not set; network unusable until provided"
            );
            Credentials::Missing { secret }
        }
        Some(raw) => match accounts.kind().parse(&raw) {
            Ok(source) => Credentials::Resolved(source),
            Err(reason) => {
                tracing::warn!(network = name, %secret, %reason, "Credential is invalid");
                Credentials::Invalid { secret, reason }
            }
        },
    };

    Ok(NetworkProfile {
        name: name.to_string(),
        chain_id,
        endpoint,
        credentials,
    })
}

fn parse_chain_id(field: &str, raw: i64) -> Result<u64> {
    u64::try_from(raw)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            Error::invalid(
                field,
                format!("chain id must be a positive integer, got {raw}"),
            )
        })
}
