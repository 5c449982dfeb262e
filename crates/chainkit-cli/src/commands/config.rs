//! Config show and check commands

use chainkit_config::ConfigSummary;
use chainkit_config::config::Status;
use colored::Colorize;

use crate::context::Session;
use crate::error::Result;

/// Run the config show command
pub fn run_config_show(session: &Session, json: bool) -> Result<()> {
    let summary = ConfigSummary::from_configuration(&session.config);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Compilers".bold());
    for compiler in &summary.compilers {
        let optimizer = if compiler.optimizer_enabled {
            format!("optimizer on, {} runs", compiler.optimizer_runs)
        } else {
            "optimizer off".to_string()
        };
        println!("  {:<10} {}", compiler.version.green(), optimizer.dimmed());
    }
    println!();

    println!("{}", "Networks".bold());
    for network in &summary.networks {
        let marker = if network.name == summary.default_network {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<16} chain {:<8} {} ({})",
            marker,
            network.name.green(),
            network.chain_id,
            network.url,
            network.accounts.dimmed()
        );
    }
    println!();

    println!("{}", "Verification".bold());
    println!(
        "  api key from {} ({})",
        summary.verification.secret.cyan(),
        status_label(summary.verification.status)
    );

    Ok(())
}

/// Run the config check command
///
/// Reaching this point means the definition is structurally valid; missing
/// secrets are reported as warnings.
pub fn run_config_check(session: &Session) -> Result<()> {
    let summary = ConfigSummary::from_configuration(&session.config);

    let mut warnings = 0;
    for network in summary.unusable_networks() {
        warnings += 1;
        let problem = network.problem.as_deref().unwrap_or("not usable");
        println!(
            "{} {} (unresolved: {})",
            "warning:".yellow().bold(),
            problem,
            network.secrets.join(", ")
        );
    }
    if summary.verification.status != Status::Ready {
        warnings += 1;
        println!(
            "{} verification API key not set ({}); contract verification will fail",
            "warning:".yellow().bold(),
            summary.verification.secret
        );
    }

    if warnings == 0 {
        println!("{} Configuration is valid", "OK".green().bold());
    } else {
        println!(
            "{} Configuration is valid with {} warning(s)",
            "OK".green().bold(),
            warnings
        );
    }
    Ok(())
}

fn status_label(status: Status) -> String {
    match status {
        Status::Ready => "ready".green().to_string(),
        Status::Missing => "missing".yellow().to_string(),
        Status::Invalid => "invalid".red().to_string(),
    }
}
