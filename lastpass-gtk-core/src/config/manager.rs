//! Loading and saving of `config.toml`

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::settings::AppSettings;
use crate::error::{ConfigError, ConfigResult};

/// Directory name below the user configuration directory
pub const CONFIG_DIR_NAME: &str = "lastpass-gtk";

/// Settings file name
pub const SETTINGS_FILE: &str = "config.toml";

/// Reads and writes the settings file
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Uses `$XDG_CONFIG_HOME/lastpass-gtk`
    ///
    /// # Errors
    /// Returns `ConfigError::NoConfigDir` if no configuration directory
    /// exists for the current user.
    pub fn new() -> ConfigResult<Self> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_config_dir(base.join(CONFIG_DIR_NAME)))
    }

    /// Uses an explicit directory, e.g. from `--config` or in tests
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Configuration directory
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Full path of the settings file
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Loads settings; a missing file yields the defaults
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_settings(&self) -> ConfigResult<AppSettings> {
        let path = self.settings_path();
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(AppSettings::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let settings = toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        info!(path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    /// Writes settings, creating the directory if needed
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn save_settings(&self, settings: &AppSettings) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::Write {
            path: self.config_dir.clone(),
            source,
        })?;

        let path = self.settings_path();
        std::fs::write(&path, content).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::SyncMode;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_dir(dir.path().join("absent"));
        assert_eq!(manager.load_settings().unwrap(), AppSettings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_dir(dir.path().join("nested/config"));

        let mut settings = AppSettings::default();
        settings.vault.binary = "/opt/lastpass/bin/lpass".into();
        settings.vault.listing_sync = SyncMode::No;
        settings.ui.width = 800;
        settings
            .keybindings
            .overrides
            .insert("win.refresh".into(), "F5".into());

        manager.save_settings(&settings).unwrap();
        assert!(manager.settings_path().exists());
        assert_eq!(manager.load_settings().unwrap(), settings);
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_dir(dir.path().to_path_buf());
        std::fs::write(manager.settings_path(), "[ui\nwidth = ").unwrap();
        assert!(matches!(manager.load_settings(), Err(ConfigError::Parse(_))));
    }
}
