//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// chainkit - compiler, network and verification profiles for contract tooling
#[derive(Parser, Debug)]
#[command(name = "chainkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root containing chainkit.toml (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Environment file to load secrets from (defaults to <root>/.env)
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Network to run against (defaults to the configured default network)
    #[arg(long, global = true, env = "CHAINKIT_NETWORK")]
    pub network: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Prints the list of accounts
    Accounts,

    /// List registered commands
    Tasks,

    /// List configured networks and whether they are usable
    Networks,

    /// Inspect the resolved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the resolved configuration with secrets redacted
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration and report missing secrets
    Check,
}
