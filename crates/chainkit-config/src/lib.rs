//! Toolchain configuration for chainkit
//!
//! This crate resolves the configuration every chainkit step reads:
//!
//! - **Compiler profile**: ordered compiler releases with optimizer settings
//! - **Network profiles**: named deployment targets with RPC endpoint, chain id
//!   and an account source resolved from a [`SecretStore`]
//! - **Verification credential**: API key for the contract-verification service
//! - **Diagnostic commands**: a [`CommandTable`] holding `accounts`
//!
//! # Architecture
//!
//! ```text
//!   chainkit.toml ──┐
//!   (or built-in)   ├─> Manifest ─> ConfigResolver ─> Configuration ─> CLI / toolchain
//!   chainkit.local ─┘                    ^
//!                                        |
//!                                   SecretStore (env, .env, memory)
//! ```
//!
//! # Example
//!
//! ```
//! use chainkit_config::{ConfigResolver, MemorySecretStore};
//!
//! let secrets = MemorySecretStore::from([("ETHERSCAN_API_KEY", "abc")]);
//! let config = ConfigResolver::builtin()?.assemble(&secrets)?;
//!
//! assert_eq!(config.compilers().primary().version.to_string(), "0.8.4");
//! assert!(config.default_network().is_usable());
//! // No mnemonic was provided, so ropsten is kept but unusable
//! assert!(config.network("ropsten")?.account_source().is_err());
//! # Ok::<(), chainkit_config::Error>(())
//! ```

pub mod command;
pub mod compiler;
pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod secret;
pub mod verification;

pub use alloy_primitives::Address;
pub use command::{
    ACCOUNTS_COMMAND, CommandAction, CommandContext, CommandTable, DiagnosticCommand,
    SignerEnumerator, register_accounts_command,
};
pub use compiler::{CompilerProfile, CompilerSpec, OptimizerSettings};
pub use config::{ConfigResolver, ConfigSummary, Configuration, Manifest};
pub use error::{Error, Result};
pub use network::{
    AccountKind, AccountSource, Credentials, DEV_MNEMONIC, Endpoint, LOCAL_CHAIN_ID, LOCAL_NETWORK,
    Mnemonic, NetworkProfile, PrivateKey,
};
pub use secret::{EnvSecretStore, MemorySecretStore, SecretStore};
pub use verification::VerificationCredential;
