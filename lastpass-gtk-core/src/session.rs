//! Login flow in front of the catalog
//!
//! The window must not list the vault until `lpass status` reports a
//! session. When it doesn't, the user is asked for an account identifier
//! (usually an email address) and `lpass login` is run with it.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::VaultResult;
use crate::vault::VaultCli;

/// Source of the login identifier, typically a modal dialog
#[async_trait(?Send)]
pub trait CredentialPrompt {
    /// Asks the user for an identifier; `None` when cancelled
    async fn prompt_identifier(&self) -> Option<String>;
}

/// Outcome of [`ensure_authenticated`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A session exists, either already or after logging in
    Authenticated,
    /// The user dismissed the prompt or entered nothing
    Cancelled,
    /// `lpass login` exited unsuccessfully
    Failed {
        /// Identifier that was tried
        identifier: String,
    },
}

impl AuthOutcome {
    /// Returns true when the catalog may be loaded
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// Makes sure the vault client has a session, prompting if needed
///
/// # Errors
/// Only when the vault tool is unavailable.
pub async fn ensure_authenticated(
    cli: &dyn VaultCli,
    prompt: &dyn CredentialPrompt,
) -> VaultResult<AuthOutcome> {
    if cli.is_authenticated().await? {
        return Ok(AuthOutcome::Authenticated);
    }

    let Some(identifier) = prompt
        .prompt_identifier()
        .await
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        info!("Login prompt cancelled");
        return Ok(AuthOutcome::Cancelled);
    };

    if cli.login(&identifier).await? {
        info!("Logged in to vault");
        Ok(AuthOutcome::Authenticated)
    } else {
        warn!("Vault login failed");
        Ok(AuthOutcome::Failed { identifier })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeVaultCli, FixedPrompt, VaultCall};

    #[tokio::test]
    async fn existing_session_skips_prompt() {
        let cli = FakeVaultCli::new().authenticated(true);
        let prompt = FixedPrompt::new(None);
        let outcome = ensure_authenticated(&cli, &prompt).await.unwrap();
        assert_eq!(outcome, AuthOutcome::Authenticated);
        assert_eq!(prompt.times_asked(), 0);
        assert_eq!(cli.calls(), [VaultCall::Status]);
    }

    #[tokio::test]
    async fn login_with_prompted_identifier() {
        let cli = FakeVaultCli::new().authenticated(false).login_succeeds(true);
        let prompt = FixedPrompt::new(Some("  me@example.com \n"));
        let outcome = ensure_authenticated(&cli, &prompt).await.unwrap();
        assert!(outcome.is_authenticated());
        assert_eq!(
            cli.calls(),
            [VaultCall::Status, VaultCall::Login("me@example.com".into())]
        );
    }

    #[tokio::test]
    async fn blank_identifier_counts_as_cancel() {
        let cli = FakeVaultCli::new().authenticated(false);
        let outcome = ensure_authenticated(&cli, &FixedPrompt::new(Some("   ")))
            .await
            .unwrap();
        assert_eq!(outcome, AuthOutcome::Cancelled);
        assert_eq!(cli.calls(), [VaultCall::Status]);
    }

    #[tokio::test]
    async fn failed_login_is_reported() {
        let cli = FakeVaultCli::new().authenticated(false).login_succeeds(false);
        let outcome = ensure_authenticated(&cli, &FixedPrompt::new(Some("me@example.com")))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Failed {
                identifier: "me@example.com".into()
            }
        );
        assert!(!outcome.is_authenticated());
    }

    #[tokio::test]
    async fn missing_tool_propagates() {
        let cli = FakeVaultCli::new().unavailable();
        let err = ensure_authenticated(&cli, &FixedPrompt::new(None))
            .await
            .unwrap_err();
        assert!(err.is_fatal());
    }
}
