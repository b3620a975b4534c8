//! Error types for the `lastpass-gtk` GUI application.

use lastpass_gtk_core::error::{ConfigError, VaultError};
use thiserror::Error;

/// Errors that keep the window from opening.
#[derive(Debug, Error)]
pub enum AppStateError {
    /// Failed to initialize a component at startup.
    #[error("Failed to initialize {component}: {reason}")]
    InitializationFailed {
        /// The component that failed to initialize.
        component: &'static str,
        /// The reason for failure.
        reason: String,
    },

    /// Settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The vault tool could not be used at all.
    #[error(transparent)]
    Vault(#[from] VaultError),
}

impl AppStateError {
    /// Heading for the error dialog.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InitializationFailed { .. } => "Initialization Error",
            Self::Config(_) => "Configuration Error",
            Self::Vault(_) => "LastPass Unavailable",
        }
    }
}
