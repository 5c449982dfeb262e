//! chainkit CLI
//!
//! Loads the project's compiler, network and verification profiles and runs
//! diagnostic commands against them.

mod cli;
mod commands;
mod context;
mod error;
mod signer;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, ConfigAction};
use context::ProjectContext;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = chainkit_config::logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        // No command provided - show help hint
        println!("{} contract toolchain configuration", "chainkit".green().bold());
        println!();
        println!("Run {} for available commands.", "chainkit --help".cyan());
        return Ok(());
    };

    let project = ProjectContext::resolve(cli.root.as_deref(), cli.env_file.as_deref())?;
    let session = project.load()?;

    match command {
        Commands::Accounts => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| CliError::user(format!("failed to start runtime: {e}")))?;
            let mut stdout = std::io::stdout();
            runtime.block_on(commands::run_accounts(
                &session,
                cli.network.as_deref(),
                &mut stdout,
            ))
        }
        Commands::Tasks => commands::run_tasks(&session),
        Commands::Networks => commands::run_networks(&session),
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => commands::run_config_show(&session, json),
            ConfigAction::Check => commands::run_config_check(&session),
        },
    }
}
