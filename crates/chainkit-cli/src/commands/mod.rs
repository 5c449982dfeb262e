//! Command implementations for chainkit-cli

pub mod accounts;
pub mod config;
pub mod networks;

pub use accounts::{run_accounts, run_tasks};
pub use config::{run_config_check, run_config_show};
pub use networks::run_networks;
