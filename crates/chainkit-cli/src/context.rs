//! Project context
//!
//! Resolves the project root and environment file from the command line,
//! then assembles the configuration and command table once per process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chainkit_config::{
    CommandTable, ConfigResolver, Configuration, EnvSecretStore, register_accounts_command,
};

use crate::error::Result;
use crate::signer::LocalSigners;

/// Environment file looked up in the project root
pub const ENV_FILE: &str = ".env";

/// Where the project lives and where its secrets come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub env_file: PathBuf,
}

impl ProjectContext {
    /// Fill in defaults: current directory for the root, `<root>/.env` for secrets.
    pub fn resolve(root: Option<&Path>, env_file: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let env_file = env_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join(ENV_FILE));
        Ok(Self { root, env_file })
    }

    /// Load secrets and definitions, then assemble.
    ///
    /// Structural problems in the definition fail here, before any command
    /// runs.
    pub fn load(&self) -> Result<Session> {
        let secrets = EnvSecretStore::with_env_file(&self.env_file)?;
        let config = ConfigResolver::discover(&self.root)?.assemble(&secrets)?;

        let mut commands = CommandTable::new();
        register_accounts_command(&mut commands, Arc::new(LocalSigners::default()))?;

        Ok(Session { config, commands })
    }
}

/// The assembled configuration and the commands that can run against it
#[derive(Debug)]
pub struct Session {
    pub config: Configuration,
    pub commands: CommandTable,
}
