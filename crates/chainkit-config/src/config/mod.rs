//! Definition loading and configuration assembly
//!
//! # Definition sources
//!
//! 1. **Project definition** - `chainkit.toml` in the project root. When it
//!    does not exist the built-in profile is used instead.
//! 2. **Local overrides** - `chainkit.local.toml` (untracked), merged on top.
//!
//! # Failure policy
//!
//! Broken definitions (empty compiler list, non-positive optimizer runs,
//! malformed versions, duplicate network names) fail assembly. Missing
//! secrets do not: the affected network is kept in an unusable state and
//! raises `MissingCredential` when something tries to use it.
//!
//! # Example
//!
//! ```ignore
//! use chainkit_config::config::ConfigResolver;
//! use chainkit_config::secret::EnvSecretStore;
//!
//! let resolver = ConfigResolver::discover(Path::new("."))?;
//! let config = resolver.assemble(&EnvSecretStore::new())?;
//! println!("default network: {}", config.default_network().name());
//! ```

mod manifest;
mod resolver;
mod summary;

pub use manifest::{
    AccountsDef, CompilerDef, Manifest, NetworkDef, OptimizerDef, SecretRef, VerificationDef,
};
pub use resolver::{ConfigResolver, Configuration, LOCAL_OVERRIDE_FILE, PROJECT_FILE};
pub use summary::{CompilerSummary, ConfigSummary, NetworkSummary, Status, VerificationSummary};
