//! Error types for `lastpass-gtk`
//!
//! Failures are split by where they come from: the external `lpass` binary,
//! decoding of its JSON output, and the settings file. [`AppError`] wraps
//! them for callers that only need a single error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while talking to the external vault tool
#[derive(Debug, Error)]
pub enum VaultError {
    /// The vault binary is missing or cannot be executed
    #[error("Vault tool '{program}' is not available: {reason}")]
    ToolUnavailable {
        /// Program that was spawned
        program: String,
        /// Reason reported by the operating system
        reason: String,
    },

    /// The vault binary ran but exited unsuccessfully
    #[error("'{command}' failed ({}): {stderr}", exit_description(.code))]
    ToolFailed {
        /// Command line that failed, without secrets
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Trimmed standard error output
        stderr: String,
    },

    /// The entry detail output could not be decoded
    #[error("Entry unavailable: {0}")]
    RecordParse(#[from] RecordParseError),

    /// I/O error while waiting on the subprocess
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[allow(clippy::ref_option)]
fn exit_description(code: &Option<i32>) -> String {
    code.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}"))
}

impl VaultError {
    /// Returns true when the error should block the user instead of being
    /// recovered locally
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::ToolUnavailable { .. })
    }
}

/// Errors raised while decoding a `lpass show --json` payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordParseError {
    /// Output was not the expected JSON shape
    #[error("malformed entry JSON: {0}")]
    Malformed(String),

    /// The JSON array contained no entries
    #[error("entry JSON array is empty")]
    EmptyArray,

    /// An expected field was absent or not a string
    #[error("entry is missing the '{0}' field")]
    MissingField(&'static str),
}

/// Errors raised while loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to write the settings file
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`crate::config::AppSettings`]
    #[error("Failed to parse settings: {0}")]
    Parse(String),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    /// No per-user configuration directory could be determined
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

/// Top-level error for callers that mix vault and configuration work
#[derive(Debug, Error)]
pub enum AppError {
    /// Vault tool error
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for vault operations
pub type VaultResult<T> = Result<T, VaultError>;

/// Result alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_tool_is_fatal() {
        let missing = VaultError::ToolUnavailable {
            program: "lpass".into(),
            reason: "not found".into(),
        };
        let failed = VaultError::ToolFailed {
            command: "lpass ls".into(),
            code: Some(1),
            stderr: "Could not find decryption key".into(),
        };
        assert!(missing.is_fatal());
        assert!(!failed.is_fatal());
        assert!(!VaultError::from(RecordParseError::EmptyArray).is_fatal());
    }

    #[test]
    fn tool_failure_message_names_exit_code() {
        let err = VaultError::ToolFailed {
            command: "lpass status".into(),
            code: Some(1),
            stderr: "Not logged in.".into(),
        };
        assert_eq!(
            err.to_string(),
            "'lpass status' failed (exit code 1): Not logged in."
        );

        let signalled = VaultError::ToolFailed {
            command: "lpass ls".into(),
            code: None,
            stderr: String::new(),
        };
        assert!(signalled.to_string().contains("terminated by signal"));
    }
}
