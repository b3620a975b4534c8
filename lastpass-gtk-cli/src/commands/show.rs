//! Show entry details command.

use std::path::Path;

use lastpass_gtk_core::catalog::load_catalog;
use lastpass_gtk_core::record::{VaultRecord, fetch_record};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{find_entry, load_backend, mask, require_session, runtime};

/// Show entry details command handler
///
/// The entry is looked up in a fresh catalog first, so only ids the
/// listing offers are ever passed to `lpass show`.
pub fn cmd_show(
    config_path: Option<&Path>,
    entry: &str,
    reveal: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    let (settings, cli) = load_backend(config_path)?;

    let (label, record) = runtime()?.block_on(async {
        require_session(&cli).await?;
        let catalog = load_catalog(&cli, settings.vault.listing_sync).await?;
        let found = find_entry(&catalog, entry)?;
        tracing::debug!(entry_id = %found.entry_id, label = %found.display_label, "Entry resolved");
        let record = fetch_record(&cli, &found.entry_id).await?;
        Ok::<_, CliError>((found.display_label.clone(), record))
    })?;

    match format {
        OutputFormat::Table => println!("{}", format_details(&label, &record, reveal)),
        OutputFormat::Json => println!("{}", format_json(&record, reveal)?),
    }

    Ok(())
}

fn password_text(record: &VaultRecord, reveal: bool) -> String {
    if reveal {
        record.expose_password().to_string()
    } else {
        mask(record.expose_password())
    }
}

/// Format entry details for the terminal
#[must_use]
pub fn format_details(label: &str, record: &VaultRecord, reveal: bool) -> String {
    let mut lines = vec![
        format!("{label}:"),
        format!("  Name:     {}", record.name),
        format!("  URL:      {}", record.url),
        format!("  Username: {}", record.username),
        format!("  Password: {}", password_text(record, reveal)),
    ];
    if !record.note.is_empty() {
        lines.push("  Note:".to_string());
        lines.extend(record.note.lines().map(|l| format!("    {l}")));
    }
    lines.join("\n")
}

/// Format entry details as JSON string
///
/// # Errors
///
/// Returns `CliError::Output` if JSON serialization fails.
pub fn format_json(record: &VaultRecord, reveal: bool) -> Result<String, CliError> {
    let output = RecordOutput {
        name: &record.name,
        url: &record.url,
        username: &record.username,
        password: password_text(record, reveal),
        note: &record.note,
    };
    serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::Output(format!("Failed to serialize to JSON: {e}")))
}

#[derive(serde::Serialize)]
struct RecordOutput<'a> {
    name: &'a str,
    url: &'a str,
    username: &'a str,
    password: String,
    note: &'a str,
}
