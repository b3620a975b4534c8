//! User settings stored in `config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::keybindings::KeybindingSettings;
use crate::tracing::{TracingConfig, TracingLevel, TracingOutput};
use crate::vault::{DEFAULT_LPASS_PROGRAM, SyncMode};

/// All persisted settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Vault client settings.
    pub vault: VaultSettings,
    /// Window settings.
    pub ui: UiSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Keyboard shortcut overrides.
    pub keybindings: KeybindingSettings,
    /// History file slot; kept in the settings but never read or written.
    pub history_file: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            vault: VaultSettings::default(),
            ui: UiSettings::default(),
            logging: LoggingSettings::default(),
            keybindings: KeybindingSettings::default(),
            history_file: "~/.rdp_history".to_string(),
        }
    }
}

impl AppSettings {
    /// History file path with `~` expanded.
    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.history_file).into_owned())
    }
}

/// Vault client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultSettings {
    /// Path or name of the `lpass` binary.
    pub binary: String,
    /// Sync mode for the initial listing.
    pub listing_sync: SyncMode,
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self {
            binary: DEFAULT_LPASS_PROGRAM.to_string(),
            listing_sync: SyncMode::Now,
        }
    }
}

/// Window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Default window width.
    pub width: u32,
    /// Default window height.
    pub height: u32,
    /// Margin around the window content.
    pub border_width: u32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 150,
            border_width: 20,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level used when `RUST_LOG` is not set.
    pub level: String,
    /// Log file; `~` is expanded. Logs go to stderr when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Raw `EnvFilter` directives, overriding `level` and `RUST_LOG`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: TracingLevel::default().to_string(),
            file: None,
            filter: None,
        }
    }
}

impl LoggingSettings {
    /// Parsed level, falling back to the default for unknown values.
    #[must_use]
    pub fn tracing_level(&self) -> TracingLevel {
        self.level.parse().unwrap_or_default()
    }

    /// Subscriber configuration built from these settings.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        let mut config = TracingConfig::new().with_level(self.tracing_level());
        if let Some(file) = self.file.as_deref().filter(|f| !f.trim().is_empty()) {
            let path = PathBuf::from(shellexpand::tilde(file.trim()).into_owned());
            config = config.with_output(TracingOutput::File(path));
        }
        if let Some(filter) = self.filter.as_deref().filter(|f| !f.trim().is_empty()) {
            config = config.with_filter(filter.trim());
        }
        config
    }
}
