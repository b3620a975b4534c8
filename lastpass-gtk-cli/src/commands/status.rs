//! Session status command.

use std::path::Path;

use lastpass_gtk_core::vault::VaultCli;

use crate::error::CliError;
use crate::util::{load_backend, runtime};

/// Status command handler
pub fn cmd_status(config_path: Option<&Path>) -> Result<(), CliError> {
    let (_, cli) = load_backend(config_path)?;
    let logged_in = runtime()?.block_on(cli.is_authenticated())?;

    if logged_in {
        println!("Logged in ({})", cli.program());
        Ok(())
    } else {
        Err(CliError::NotAuthenticated)
    }
}
