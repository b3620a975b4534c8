//! CLI error types and exit codes.

use lastpass_gtk_core::error::{ConfigError, VaultError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, serialization, or I/O
    pub const GENERAL_ERROR: i32 = 1;
    /// The vault tool failed or the entry does not exist
    pub const VAULT_FAILURE: i32 = 2;
    /// lpass has no session
    pub const NOT_AUTHENTICATED: i32 = 3;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Vault tool error
    #[error("{0}")]
    Vault(#[from] VaultError),

    /// No catalog entry matches the given id or label
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// lpass is not logged in
    #[error("Not logged in. Run `lastpass-gtk-cli login <email>` first.")]
    NotAuthenticated,

    /// Login was rejected
    #[error("Login failed for {0}")]
    LoginFailed(String),

    /// Output could not be produced
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Vault(_) | Self::EntryNotFound(_) => exit_codes::VAULT_FAILURE,
            Self::NotAuthenticated | Self::LoginFailed(_) => exit_codes::NOT_AUTHENTICATED,
            Self::Config(_) | Self::Output(_) | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
