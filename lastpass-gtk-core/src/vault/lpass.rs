//! `lpass` subprocess backend
//!
//! Arguments are always passed as separate argv elements; nothing goes
//! through a shell, so entry ids and login identifiers are never
//! interpolated into a command string.

use std::io;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{VaultError, VaultResult};

use super::{SyncMode, VaultCli};

/// Program name used when no explicit binary is configured
pub const DEFAULT_LPASS_PROGRAM: &str = "lpass";

/// Runs the real LastPass CLI
#[derive(Debug, Clone)]
pub struct LpassCli {
    program: String,
}

impl Default for LpassCli {
    fn default() -> Self {
        Self::new(DEFAULT_LPASS_PROGRAM)
    }
}

impl LpassCli {
    /// Creates a backend for the given program, expanding `~` and
    /// environment variables in the path
    #[must_use]
    pub fn new(program: impl AsRef<str>) -> Self {
        let program = program.as_ref();
        let expanded = shellexpand::full(program)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| program.to_string());
        Self { program: expanded }
    }

    /// Creates a backend from the vault section of the settings
    #[must_use]
    pub fn from_settings(settings: &crate::config::VaultSettings) -> Self {
        Self::new(&settings.binary)
    }

    /// Program that will be spawned
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).kill_on_drop(true);
        cmd
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut line = self.program.clone();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    fn spawn_error(&self, err: io::Error) -> VaultError {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                VaultError::ToolUnavailable {
                    program: self.program.clone(),
                    reason: err.to_string(),
                }
            }
            _ => VaultError::Io(err),
        }
    }

    /// Runs `args`, capturing output. Non-zero exit becomes `ToolFailed`.
    async fn capture(&self, args: &[&str]) -> VaultResult<String> {
        let command = self.describe(args);
        debug!(command = %command, "Running vault command");

        let output: Output = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                command = %command,
                code = ?output.status.code(),
                stderr = %stderr,
                "Vault command failed"
            );
            return Err(VaultError::ToolFailed {
                command,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Runs `args` for its exit status only
    async fn succeeds(&self, args: &[&str], interactive: bool) -> VaultResult<bool> {
        let command = self.describe(args);
        debug!(command = %command, interactive, "Checking vault command status");

        let mut cmd = self.command(args);
        if !interactive {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }

        let status = cmd.status().await.map_err(|e| self.spawn_error(e))?;
        debug!(command = %command, code = ?status.code(), "Vault command finished");
        Ok(status.success())
    }
}

#[async_trait]
impl VaultCli for LpassCli {
    async fn list_raw(&self, sync: SyncMode) -> VaultResult<String> {
        let sync_flag = sync.flag();
        self.capture(&["ls", &sync_flag, "--color=never"]).await
    }

    async fn fetch_entry(&self, entry_id: &str) -> VaultResult<String> {
        let sync_flag = SyncMode::No.flag();
        self.capture(&["show", &sync_flag, "-j", entry_id]).await
    }

    async fn is_authenticated(&self) -> VaultResult<bool> {
        self.succeeds(&["status"], false).await
    }

    async fn login(&self, identifier: &str) -> VaultResult<bool> {
        // lpass asks for the master password through its own pinentry
        self.succeeds(&["login", identifier], true).await
    }
}
