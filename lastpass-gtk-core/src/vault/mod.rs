//! Access to the external LastPass command-line client
//!
//! All vault I/O goes through the [`VaultCli`] trait so the catalog loader
//! and the detail fetcher can run against [`crate::testing::FakeVaultCli`]
//! instead of spawning real processes. [`LpassCli`] is the production
//! implementation over `lpass`.
//!
//! No parsing happens here: callers receive the raw standard output.

mod lpass;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::VaultResult;

pub use lpass::{DEFAULT_LPASS_PROGRAM, LpassCli};

/// How `lpass` should synchronise with the remote vault before answering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Force a sync with the server first
    #[default]
    Now,
    /// Let lpass decide based on cache age
    Auto,
    /// Answer from the local cache only
    No,
}

impl SyncMode {
    /// Value passed as `--sync=<value>`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Now => "now",
            Self::Auto => "auto",
            Self::No => "no",
        }
    }

    /// Full command-line flag
    #[must_use]
    pub fn flag(self) -> String {
        format!("--sync={}", self.as_str())
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "now" => Ok(Self::Now),
            "auto" => Ok(Self::Auto),
            "no" => Ok(Self::No),
            other => Err(format!("unknown sync mode '{other}' (expected now, auto or no)")),
        }
    }
}

/// Capability to run the vault client
///
/// Every method blocks the awaiting task until the subprocess exits; no
/// timeout is applied on top of whatever the vault tool itself does.
#[async_trait]
pub trait VaultCli: Send + Sync {
    /// Runs the listing command and returns its standard output
    ///
    /// # Errors
    /// `ToolUnavailable` when the binary cannot be spawned, `ToolFailed`
    /// on a non-zero exit.
    async fn list_raw(&self, sync: SyncMode) -> VaultResult<String>;

    /// Runs the show command for one entry, returning its JSON output
    ///
    /// Never forces a sync; the answer comes from the client's local cache.
    ///
    /// # Errors
    /// `ToolUnavailable` when the binary cannot be spawned, `ToolFailed`
    /// on a non-zero exit.
    async fn fetch_entry(&self, entry_id: &str) -> VaultResult<String>;

    /// Returns whether the client currently holds a logged-in session
    ///
    /// # Errors
    /// Only `ToolUnavailable`; a non-zero exit means `Ok(false)`.
    async fn is_authenticated(&self) -> VaultResult<bool>;

    /// Logs in with the given account identifier
    ///
    /// # Errors
    /// Only `ToolUnavailable`; a non-zero exit means `Ok(false)`.
    async fn login(&self, identifier: &str) -> VaultResult<bool>;
}
