//! Test doubles for the vault client
//!
//! [`FakeVaultCli`] answers every [`VaultCli`] call from canned data and
//! records the calls it received, so catalog, fetch and login logic can be
//! exercised without an `lpass` binary. [`FixedPrompt`] stands in for the
//! login dialog.

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{VaultError, VaultResult};
use crate::session::CredentialPrompt;
use crate::vault::{SyncMode, VaultCli};

/// A call received by [`FakeVaultCli`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultCall {
    /// `list_raw`
    List(SyncMode),
    /// `fetch_entry`
    Show(String),
    /// `is_authenticated`
    Status,
    /// `login`
    Login(String),
}

/// In-memory [`VaultCli`] with canned responses
#[derive(Debug, Default)]
pub struct FakeVaultCli {
    listing: Option<String>,
    entries: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    authenticated: bool,
    login_succeeds: bool,
    unavailable: bool,
    calls: Mutex<Vec<VaultCall>>,
}

impl FakeVaultCli {
    /// Creates a fake with no data; listing and show fail until configured
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text returned by `list_raw`
    #[must_use]
    pub fn with_listing(mut self, listing: impl Into<String>) -> Self {
        self.listing = Some(listing.into());
        self
    }

    /// Sets the JSON returned by `fetch_entry` for `entry_id`
    #[must_use]
    pub fn with_entry(mut self, entry_id: impl Into<String>, json: impl Into<String>) -> Self {
        self.entries.insert(entry_id.into(), json.into());
        self
    }

    /// Makes `fetch_entry` for `entry_id` sleep before answering
    #[must_use]
    pub fn with_fetch_delay(mut self, entry_id: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(entry_id.into(), delay);
        self
    }

    /// Sets what `is_authenticated` reports
    #[must_use]
    pub const fn authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    /// Sets whether `login` succeeds
    #[must_use]
    pub const fn login_succeeds(mut self, succeeds: bool) -> Self {
        self.login_succeeds = succeeds;
        self
    }

    /// Makes every call fail as if the binary were missing
    #[must_use]
    pub const fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Calls received so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<VaultCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: VaultCall) -> VaultResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.unavailable {
            return Err(VaultError::ToolUnavailable {
                program: "lpass".to_string(),
                reason: "No such file or directory (os error 2)".to_string(),
            });
        }
        Ok(())
    }

    fn failure(command: String) -> VaultError {
        VaultError::ToolFailed {
            command,
            code: Some(1),
            stderr: "Error: Could not find specified account(s).".to_string(),
        }
    }
}

#[async_trait]
impl VaultCli for FakeVaultCli {
    async fn list_raw(&self, sync: SyncMode) -> VaultResult<String> {
        self.record(VaultCall::List(sync))?;
        self.listing
            .clone()
            .ok_or_else(|| Self::failure(format!("lpass ls {}", sync.flag())))
    }

    async fn fetch_entry(&self, entry_id: &str) -> VaultResult<String> {
        self.record(VaultCall::Show(entry_id.to_string()))?;
        if let Some(delay) = self.delays.get(entry_id) {
            tokio::time::sleep(*delay).await;
        }
        self.entries
            .get(entry_id)
            .cloned()
            .ok_or_else(|| Self::failure(format!("lpass show --sync=no -j {entry_id}")))
    }

    async fn is_authenticated(&self) -> VaultResult<bool> {
        self.record(VaultCall::Status)?;
        Ok(self.authenticated)
    }

    async fn login(&self, identifier: &str) -> VaultResult<bool> {
        self.record(VaultCall::Login(identifier.to_string()))?;
        Ok(self.login_succeeds)
    }
}

/// Prompt that always answers the same way
#[derive(Debug)]
pub struct FixedPrompt {
    answer: Option<String>,
    asked: Cell<usize>,
}

impl FixedPrompt {
    /// Creates a prompt returning `answer`; `None` simulates cancel
    #[must_use]
    pub fn new(answer: Option<&str>) -> Self {
        Self {
            answer: answer.map(str::to_owned),
            asked: Cell::new(0),
        }
    }

    /// How often the prompt was shown
    #[must_use]
    pub fn times_asked(&self) -> usize {
        self.asked.get()
    }
}

#[async_trait(?Send)]
impl CredentialPrompt for FixedPrompt {
    async fn prompt_identifier(&self) -> Option<String> {
        self.asked.set(self.asked.get() + 1);
        self.answer.clone()
    }
}

/// JSON as printed by `lpass show -j` for one entry
#[must_use]
pub fn entry_json(name: &str, url: &str, username: &str, password: &str, note: &str) -> String {
    serde_json::json!([{
        "id": "0",
        "name": name,
        "fullname": name,
        "username": username,
        "password": password,
        "last_modified_gmt": "0",
        "last_touch": "0",
        "group": "",
        "url": url,
        "note": note,
    }])
    .to_string()
}
