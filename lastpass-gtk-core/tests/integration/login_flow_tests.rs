//! Login gate in front of the catalog

use lastpass_gtk_core::catalog::load_catalog;
use lastpass_gtk_core::session::{AuthOutcome, ensure_authenticated};
use lastpass_gtk_core::testing::{FakeVaultCli, FixedPrompt, VaultCall};
use lastpass_gtk_core::vault::SyncMode;

#[tokio::test]
async fn authenticated_session_loads_catalog() {
    let cli = FakeVaultCli::new()
        .authenticated(true)
        .with_listing("Work/Email [id: 101]");
    let prompt = FixedPrompt::new(Some("unused@example.com"));

    let outcome = ensure_authenticated(&cli, &prompt).await.unwrap();
    assert!(outcome.is_authenticated());

    let catalog = load_catalog(&cli, SyncMode::Now).await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(prompt.times_asked(), 0);
    assert_eq!(
        cli.calls(),
        [VaultCall::Status, VaultCall::List(SyncMode::Now)]
    );
}

#[tokio::test]
async fn cancelled_login_never_lists() {
    let cli = FakeVaultCli::new()
        .authenticated(false)
        .with_listing("Work/Email [id: 101]");
    let prompt = FixedPrompt::new(None);

    let outcome = ensure_authenticated(&cli, &prompt).await.unwrap();
    assert_eq!(outcome, AuthOutcome::Cancelled);
    assert_eq!(prompt.times_asked(), 1);
    assert_eq!(cli.calls(), [VaultCall::Status]);
}

#[tokio::test]
async fn failed_login_keeps_user_out() {
    let cli = FakeVaultCli::new()
        .authenticated(false)
        .login_succeeds(false);
    let prompt = FixedPrompt::new(Some("me@example.com"));

    let outcome = ensure_authenticated(&cli, &prompt).await.unwrap();
    assert!(!outcome.is_authenticated());
    assert_eq!(
        cli.calls(),
        [VaultCall::Status, VaultCall::Login("me@example.com".into())]
    );
}
