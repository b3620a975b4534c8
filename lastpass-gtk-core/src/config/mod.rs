//! Configuration management for `lastpass-gtk`
//!
//! Settings live in a single TOML file handled by [`ConfigManager`].

pub mod keybindings;
mod manager;
mod settings;

pub use keybindings::{
    ACTION_ACTIVATE_ENTRY, ACTION_CLOSE, ACTION_REFRESH, KeybindingDef, KeybindingSettings,
    default_keybindings, is_valid_accelerator,
};
pub use manager::{CONFIG_DIR_NAME, ConfigManager, SETTINGS_FILE};
pub use settings::{AppSettings, LoggingSettings, UiSettings, VaultSettings};
