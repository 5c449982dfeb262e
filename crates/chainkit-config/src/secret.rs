//! Secret stores
//!
//! Credentials never live in the definition file. A definition only names the
//! secret (`{ env = "TESTNET_MNEMONIC" }`) and the resolver asks a
//! [`SecretStore`] for its value at load time.

use std::collections::HashMap;
use std::path::Path;

use crate::{Error, Result};

/// Key-value lookup for secret material.
///
/// Implementations return `None` for unknown keys. Callers go through
/// [`lookup`] so that empty values count as "not provided".
pub trait SecretStore {
    fn get(&self, key: &str) -> Option<String>;
}

/// Look up `key`, treating empty and whitespace-only values as absent.
pub fn lookup(store: &dyn SecretStore, key: &str) -> Option<String> {
    store
        .get(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Secret store backed by the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    pub fn new() -> Self {
        Self
    }

    /// Load `path` into the process environment, then read from it.
    ///
    /// A missing file is skipped. Variables already set in the environment
    /// win over the file.
    pub fn with_env_file(path: &Path) -> Result<Self> {
        if path.is_file() {
            tracing::debug!(?path, "Loading environment file");
            dotenv::from_path(path).map_err(|source| Error::EnvFile {
                path: path.to_path_buf(),
                source,
            })?;
        } else {
            tracing::debug!(?path, "No environment file found, skipping");
        }
        Ok(Self)
    }
}

impl SecretStore for EnvSecretStore {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory secret store, mostly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    values: HashMap<String, String>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MemorySecretStore {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut store = Self::new();
        for (key, value) in pairs {
            store.insert(key, value);
        }
        store
    }
}
