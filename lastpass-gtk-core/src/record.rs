//! Entry details fetched from `lpass show --json`.
//!
//! Records are fetched fresh for every selection and never cached, so the
//! window always shows the latest decrypted state.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{RecordParseError, VaultResult};
use crate::vault::VaultCli;

/// Details of a single vault entry.
#[derive(Debug, Clone)]
pub struct VaultRecord {
    /// Entry name.
    pub name: String,
    /// Site URL.
    pub url: String,
    /// Login name.
    pub username: String,
    /// Password, kept out of `Debug` output.
    pub password: SecretString,
    /// Free-form note.
    pub note: String,
}

impl VaultRecord {
    /// Creates a record from plain strings.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
            note: note.into(),
        }
    }

    /// Returns the password in clear text.
    #[must_use]
    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }
}

fn string_field(object: &serde_json::Map<String, Value>, field: &'static str) -> Result<String, RecordParseError> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(RecordParseError::MissingField(field))
}

/// Decodes the JSON array printed by `lpass show -j`.
///
/// Only the first element is used; unknown fields are ignored.
///
/// # Errors
/// Returns `RecordParseError` for invalid JSON, a non-array payload, an
/// empty array, or a missing string field.
pub fn decode_record(json: &str) -> Result<VaultRecord, RecordParseError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| RecordParseError::Malformed(e.to_string()))?;

    let items = value
        .as_array()
        .ok_or_else(|| RecordParseError::Malformed("expected a JSON array".to_string()))?;
    let first = items.first().ok_or(RecordParseError::EmptyArray)?;
    let object = first
        .as_object()
        .ok_or_else(|| RecordParseError::Malformed("expected an entry object".to_string()))?;

    Ok(VaultRecord {
        name: string_field(object, "name")?,
        url: string_field(object, "url")?,
        username: string_field(object, "username")?,
        password: SecretString::from(string_field(object, "password")?),
        note: string_field(object, "note")?,
    })
}

/// Fetches and decodes one entry.
///
/// # Errors
/// Propagates vault tool errors; decode failures become
/// `VaultError::RecordParse`.
pub async fn fetch_record(cli: &dyn VaultCli, entry_id: &str) -> VaultResult<VaultRecord> {
    let raw = cli.fetch_entry(entry_id).await?;
    match decode_record(&raw) {
        Ok(record) => {
            debug!(entry_id, "Entry details fetched");
            Ok(record)
        }
        Err(e) => {
            warn!(entry_id, error = %e, "Entry details could not be decoded");
            Err(e.into())
        }
    }
}

/// Detail pane contents for one record.
///
/// `name`, `username` and `password` are finished label texts. `url` and
/// `note` are the raw values; the window renders them as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    /// `"Name: …"`.
    pub name: String,
    /// Site URL as stored in the vault.
    pub url: String,
    /// `"Username: …"`.
    pub username: String,
    /// `"Password: …"`.
    pub password: String,
    /// Note body as stored in the vault.
    pub note: String,
}

impl RecordView {
    /// Placeholder texts shown before anything is selected.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            name: "Name: ".to_string(),
            url: String::new(),
            username: "Username: ".to_string(),
            password: "Password: ".to_string(),
            note: String::new(),
        }
    }

    /// Formats a record for display.
    #[must_use]
    pub fn from_record(record: &VaultRecord) -> Self {
        Self {
            name: format!("Name: {}", record.name),
            url: record.url.clone(),
            username: format!("Username: {}", record.username),
            password: format!("Password: {}", record.expose_password()),
            note: record.note.clone(),
        }
    }
}
