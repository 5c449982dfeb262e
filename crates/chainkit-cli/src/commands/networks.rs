//! List configured networks

use colored::Colorize;

use crate::context::Session;
use crate::error::Result;

/// Run the networks command
pub fn run_networks(session: &Session) -> Result<()> {
    let default = session.config.default_network().name();

    println!("{}", "Networks".bold());
    println!();
    for network in session.config.networks() {
        let state = match network.check() {
            Ok(()) => "ready".green().to_string(),
            Err(e) => e.to_string().yellow().to_string(),
        };
        let name = if network.name() == default {
            format!("{} (default)", network.name())
        } else {
            network.name().to_string()
        };
        println!(
            "  {:<26} chain {:<8} {}",
            name.green(),
            network.chain_id(),
            state
        );
    }

    Ok(())
}
