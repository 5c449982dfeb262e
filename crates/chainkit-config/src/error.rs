//! Error types for chainkit-config

use std::path::PathBuf;

/// Result type for chainkit-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or using a configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field of the static definition is malformed
    #[error("Invalid definition at {field}: {message}")]
    InvalidDefinition { field: String, message: String },

    /// Two networks in one definition share a name
    #[error("Duplicate network name: {name}")]
    DuplicateNetwork { name: String },

    /// Network lookup by name failed
    #[error("Unknown network: {name}")]
    UnknownNetwork { name: String },

    /// A network's secret was absent or empty in the secret store
    #[error("Missing credential for network {network}: {secret} is not set")]
    MissingCredential { network: String, secret: String },

    /// A network's secret was present but unusable
    #[error("Invalid credential for network {network} ({secret}): {reason}")]
    InvalidCredential {
        network: String,
        secret: String,
        reason: String,
    },

    /// Verification was requested without an API key
    #[error("Missing API key for the verification service: {secret} is not set")]
    MissingVerificationKey { secret: String },

    /// The signer-enumeration capability failed
    #[error("Signer enumeration failed for network {network}: {message}")]
    SignerEnumeration { network: String, message: String },

    /// The signer-enumeration capability returned nothing
    #[error("No signers available for network {network}")]
    NoSigners { network: String },

    /// Dispatch of an unregistered command
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    /// A command name was registered twice
    #[error("Command already registered: {name}")]
    DuplicateCommand { name: String },

    /// An environment file exists but could not be parsed
    #[error("Failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenv::Error,
    },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this error means the definition itself is broken.
    ///
    /// Structural errors abort assembly; nothing downstream may run.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::InvalidDefinition { .. } | Error::DuplicateNetwork { .. } | Error::TomlDe(_)
        )
    }

    /// Whether this error was recorded at load time and raised on use.
    pub fn is_deferred(&self) -> bool {
        matches!(
            self,
            Error::MissingCredential { .. }
                | Error::InvalidCredential { .. }
                | Error::MissingVerificationKey { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_network_names_the_duplicate() {
        let err = Error::DuplicateNetwork {
            name: "ropsten".into(),
        };
        assert!(err.to_string().contains("ropsten"));
        assert!(err.is_structural());
        assert!(!err.is_deferred());
    }

    #[test]
    fn missing_credential_is_deferred() {
        let err = Error::MissingCredential {
            network: "bsc-testnet".into(),
            secret: "TESTNET_PRIVATE_KEY".into(),
        };
        let display = err.to_string();
        assert!(display.contains("bsc-testnet"));
        assert!(display.contains("TESTNET_PRIVATE_KEY"));
        assert!(err.is_deferred());
        assert!(!err.is_structural());
    }
}
