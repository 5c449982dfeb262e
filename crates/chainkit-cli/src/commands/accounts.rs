//! Registered-command dispatch: `accounts` and the `tasks` listing

use std::io::Write;

use chainkit_config::{ACCOUNTS_COMMAND, CommandContext};
use colored::Colorize;

use crate::context::Session;
use crate::error::Result;

/// Run the accounts command against `network` (or the default network)
pub async fn run_accounts(
    session: &Session,
    network: Option<&str>,
    out: &mut (dyn Write + Send),
) -> Result<()> {
    let ctx = CommandContext::new(&session.config, network)?;
    session
        .commands
        .dispatch(ACCOUNTS_COMMAND, &ctx, &[], out)
        .await?;
    Ok(())
}

/// Run the tasks command
pub fn run_tasks(session: &Session) -> Result<()> {
    println!("{}", "Available Tasks".bold());
    println!();
    for command in session.commands.iter() {
        println!("  {:<14} {}", command.name.green(), command.description);
    }
    Ok(())
}
