//! Login command.

use std::path::Path;

use lastpass_gtk_core::vault::VaultCli;

use crate::error::CliError;
use crate::util::{load_backend, runtime};

/// Login command handler
///
/// `lpass` prompts for the master password itself, on the terminal or
/// through pinentry.
pub fn cmd_login(config_path: Option<&Path>, identifier: &str) -> Result<(), CliError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(CliError::LoginFailed("an empty identifier".to_string()));
    }

    let (_, cli) = load_backend(config_path)?;
    tracing::info!("Starting lpass login");
    if runtime()?.block_on(cli.login(identifier))? {
        println!("Logged in as {identifier}");
        Ok(())
    } else {
        Err(CliError::LoginFailed(identifier.to_string()))
    }
}
