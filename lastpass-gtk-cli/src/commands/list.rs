//! List entries command.

use std::fmt::Write as _;
use std::path::Path;

use lastpass_gtk_core::catalog::{Catalog, CatalogEntry, load_catalog};
use lastpass_gtk_core::vault::SyncMode;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{load_backend, require_session, runtime};

/// List entries command handler
pub fn cmd_list(
    config_path: Option<&Path>,
    format: OutputFormat,
    sync: Option<SyncMode>,
) -> Result<(), CliError> {
    let (settings, cli) = load_backend(config_path)?;
    let sync = sync.unwrap_or(settings.vault.listing_sync);
    tracing::debug!(%sync, program = cli.program(), "Listing entries");

    let catalog = runtime()?.block_on(async {
        require_session(&cli).await?;
        load_catalog(&cli, sync).await.map_err(CliError::from)
    })?;

    match format {
        OutputFormat::Table => println!("{}", format_table(&catalog)),
        OutputFormat::Json => println!("{}", format_json(&catalog)?),
    }

    Ok(())
}

/// Format the catalog as a table string
#[must_use]
pub fn format_table(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return "No entries found.".to_string();
    }

    let mut output = String::new();

    let label_width = catalog
        .iter()
        .map(|e| e.display_label.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let _ = writeln!(output, "{:<label_width$}  ID", "LABEL");
    let _ = writeln!(output, "{:-<label_width$}  {:-<2}", "", "");

    for entry in catalog {
        let _ = writeln!(
            output,
            "{:<label_width$}  {}",
            entry.display_label, entry.entry_id
        );
    }

    output.trim_end().to_string()
}

/// Format the catalog as JSON string
///
/// # Errors
///
/// Returns `CliError::Output` if JSON serialization fails.
pub fn format_json(catalog: &Catalog) -> Result<String, CliError> {
    let output: Vec<EntryOutput<'_>> = catalog.iter().map(EntryOutput::from).collect();
    serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::Output(format!("Failed to serialize to JSON: {e}")))
}

/// Catalog entry as printed by `list --format json`
#[derive(Debug, serde::Serialize)]
pub struct EntryOutput<'a> {
    pub id: &'a str,
    pub label: &'a str,
}

impl<'a> From<&'a CatalogEntry> for EntryOutput<'a> {
    fn from(entry: &'a CatalogEntry) -> Self {
        Self {
            id: &entry.entry_id,
            label: &entry.display_label,
        }
    }
}
