//! CLI help and command-name contract for logging.

use crate::cli::parse::{Commands, ConfigCommands};

/// Command name string for logs (e.g. "generate", "config.show").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Generate { .. } => "generate".to_string(),
        Commands::Prompt { .. } => "prompt".to_string(),
        Commands::Schema => "schema".to_string(),
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
    }
}

pub fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::Show => "show",
        ConfigCommands::Init { .. } => "init",
    }
}

/// Whether the command talks to the remote model.
pub fn uses_network(command: &Commands) -> bool {
    matches!(command, Commands::Generate { .. })
}
