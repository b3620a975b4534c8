//! Shared utility functions used across command modules.

use std::path::Path;

use lastpass_gtk_core::catalog::{Catalog, CatalogEntry};
use lastpass_gtk_core::config::{AppSettings, ConfigManager};
use lastpass_gtk_core::vault::{LpassCli, VaultCli};

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads settings and builds the `lpass` backend from them
pub fn load_backend(config_path: Option<&Path>) -> Result<(AppSettings, LpassCli), CliError> {
    let settings = create_config_manager(config_path)?.load_settings()?;
    let cli = LpassCli::from_settings(&settings.vault);
    Ok((settings, cli))
}

/// Creates the runtime the async core calls are driven on
pub fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Config(format!("Runtime error: {e}")))
}

/// Fails with `NotAuthenticated` unless `lpass` has a session
pub async fn require_session(cli: &dyn VaultCli) -> Result<(), CliError> {
    if cli.is_authenticated().await? {
        Ok(())
    } else {
        Err(CliError::NotAuthenticated)
    }
}

/// Finds a catalog entry by id, then by exact display label
pub fn find_entry<'a>(catalog: &'a Catalog, id_or_label: &str) -> Result<&'a CatalogEntry, CliError> {
    catalog
        .iter()
        .find(|e| e.entry_id == id_or_label)
        .or_else(|| catalog.find_by_label(id_or_label))
        .ok_or_else(|| CliError::EntryNotFound(id_or_label.to_string()))
}

/// Replaces every character of a secret with `*`
#[must_use]
pub fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
