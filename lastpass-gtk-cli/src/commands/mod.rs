//! Command handler modules for the CLI.

mod completions;
mod list;
mod login;
mod show;
mod status;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::List { format, sync } => list::cmd_list(config_path, format, sync.map(Into::into)),
        Commands::Show {
            entry,
            reveal,
            format,
        } => show::cmd_show(config_path, &entry, reveal, format),
        Commands::Status => status::cmd_status(config_path),
        Commands::Login { identifier } => login::cmd_login(config_path, &identifier),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
