//! Diagnostic commands
//!
//! Commands are registered into a [`CommandTable`] owned by whoever
//! dispatches them. Capabilities a command needs, such as the
//! [`SignerEnumerator`] behind `accounts`, are handed over at registration.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::config::Configuration;
use crate::network::NetworkProfile;
use crate::{Error, Result};

/// Name of the account-listing command
pub const ACCOUNTS_COMMAND: &str = "accounts";

/// Lists the signer addresses available on a network.
///
/// Implementations report credential problems with the profile's own
/// deferred errors (see [`NetworkProfile::account_source`]).
#[async_trait]
pub trait SignerEnumerator: Send + Sync {
    async fn signers(&self, network: &NetworkProfile) -> Result<Vec<Address>>;
}

/// What a command runs against
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub config: &'a Configuration,
    pub network: &'a NetworkProfile,
}

impl<'a> CommandContext<'a> {
    /// Context for `network`, or for the default network when `None`
    pub fn new(config: &'a Configuration, network: Option<&str>) -> Result<Self> {
        Ok(Self {
            config,
            network: config.select_network(network)?,
        })
    }
}

/// Body of a registered command
#[async_trait]
pub trait CommandAction: Send + Sync {
    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        args: &[String],
        out: &mut (dyn Write + Send),
    ) -> Result<()>;
}

/// A named, described command
#[derive(Clone)]
pub struct DiagnosticCommand {
    pub name: String,
    pub description: String,
    action: Arc<dyn CommandAction>,
}

impl DiagnosticCommand {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        action: Arc<dyn CommandAction>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            action,
        }
    }
}

impl std::fmt::Debug for DiagnosticCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticCommand")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Registered commands, keyed by name
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: BTreeMap<String, DiagnosticCommand>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: DiagnosticCommand) -> Result<()> {
        if self.commands.contains_key(&command.name) {
            return Err(Error::DuplicateCommand { name: command.name });
        }
        tracing::debug!(command = %command.name, "Registered command");
        self.commands.insert(command.name.clone(), command);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&DiagnosticCommand> {
        self.commands.get(name)
    }

    /// Commands sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticCommand> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub async fn dispatch(
        &self,
        name: &str,
        ctx: &CommandContext<'_>,
        args: &[String],
        out: &mut (dyn Write + Send),
    ) -> Result<()> {
        let command = self.get(name).ok_or_else(|| Error::UnknownCommand {
            name: name.to_string(),
        })?;
        tracing::debug!(command = name, network = ctx.network.name(), "Dispatching command");
        command.action.run(ctx, args, out).await
    }
}

/// Register `accounts`, bound to `signers`.
pub fn register_accounts_command(
    table: &mut CommandTable,
    signers: Arc<dyn SignerEnumerator>,
) -> Result<()> {
    table.register(DiagnosticCommand::new(
        ACCOUNTS_COMMAND,
        "Prints the list of accounts",
        Arc::new(AccountsCommand { signers }),
    ))
}

struct AccountsCommand {
    signers: Arc<dyn SignerEnumerator>,
}

#[async_trait]
impl CommandAction for AccountsCommand {
    async fn run(
        &self,
        ctx: &CommandContext<'_>,
        args: &[String],
        out: &mut (dyn Write + Send),
    ) -> Result<()> {
        if !args.is_empty() {
            tracing::debug!(?args, "accounts takes no arguments, ignoring");
        }

        let network = ctx.network.name().to_string();
        let addresses = match self.signers.signers(ctx.network).await {
            Ok(addresses) => addresses,
            Err(e) if e.is_deferred() || matches!(e, Error::SignerEnumeration { .. }) => {
                return Err(e);
            }
            Err(e) => {
                return Err(Error::SignerEnumeration {
                    network,
                    message: e.to_string(),
                });
            }
        };

        if addresses.is_empty() {
            return Err(Error::NoSigners { network });
        }

        for address in &addresses {
            writeln!(out, "{}", address.to_checksum(None))?;
        }
        out.flush()?;
        Ok(())
    }
}
