//! Listing → selection → detail fetch against the fake vault client.

use std::cell::RefCell;
use std::time::Duration;

use lastpass_gtk_core::catalog::{Catalog, CatalogEntry, load_catalog};
use lastpass_gtk_core::record::{RecordView, fetch_record};
use lastpass_gtk_core::selection::{FetchTicket, SelectionController};
use lastpass_gtk_core::testing::{FakeVaultCli, VaultCall, entry_json};
use lastpass_gtk_core::vault::SyncMode;
use lastpass_gtk_core::{RecordParseError, VaultError};

const LISTING: &str = "Work/Email [id: 101]\nWork/ [id: 102]\nmalformed line\nPersonal/Bank [id: 103]";

fn vault() -> FakeVaultCli {
    FakeVaultCli::new()
        .with_listing(LISTING)
        .with_entry(
            "101",
            entry_json("Email", "https://mail.example.com", "me", "s3cret", "work mail"),
        )
        .with_entry(
            "103",
            entry_json("Bank", "https://bank.example.com", "acct", "pin", ""),
        )
}

#[tokio::test]
async fn catalog_from_listing() {
    let cli = vault();
    let catalog = load_catalog(&cli, SyncMode::Now).await.unwrap();

    assert_eq!(
        catalog.entries(),
        [
            CatalogEntry::new("Bank (Personal)", "103"),
            CatalogEntry::new("Email (Work)", "101"),
        ]
    );
    assert_eq!(cli.calls(), [VaultCall::List(SyncMode::Now)]);
}

#[tokio::test]
async fn failed_listing_gives_empty_catalog() {
    let cli = FakeVaultCli::new();
    let catalog = load_catalog(&cli, SyncMode::No).await.unwrap();
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn missing_tool_is_not_swallowed() {
    let cli = FakeVaultCli::new().unavailable();
    let err = load_catalog(&cli, SyncMode::Now).await.unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn typed_label_fetches_entry() {
    let cli = vault();
    let catalog = load_catalog(&cli, SyncMode::Now).await.unwrap();
    let mut controller = SelectionController::new();

    let ticket = controller.begin(&catalog, None, "Email (Work)").unwrap();
    assert_eq!(ticket.entry_id, "101");

    let result = fetch_record(&cli, &ticket.entry_id).await;
    let record = controller.complete(&ticket, result).unwrap().unwrap();
    let view = RecordView::from_record(&record);

    assert_eq!(view.name, "Name: Email");
    assert_eq!(view.username, "Username: me");
    assert_eq!(view.password, "Password: s3cret");
    assert_eq!(view.url, "https://mail.example.com");
    assert_eq!(view.note, "work mail");
    assert_eq!(controller.state().displayed_id(), Some("101"));
    assert_eq!(
        cli.calls(),
        [VaultCall::List(SyncMode::Now), VaultCall::Show("101".into())]
    );
}

#[tokio::test]
async fn unresolved_text_does_not_fetch() {
    let cli = vault();
    let catalog = load_catalog(&cli, SyncMode::Now).await.unwrap();
    let mut controller = SelectionController::new();

    assert!(controller.begin(&catalog, None, "Ema").is_none());
    assert!(controller.begin(&catalog, Some("102"), "").is_none());
    assert_eq!(cli.calls(), [VaultCall::List(SyncMode::Now)]);
}

#[tokio::test]
async fn broken_detail_keeps_previous_record() {
    let cli = vault().with_entry("103", "[]");
    let catalog = load_catalog(&cli, SyncMode::Now).await.unwrap();
    let mut controller = SelectionController::new();

    let first = controller.begin(&catalog, Some("101"), "").unwrap();
    let result = fetch_record(&cli, &first.entry_id).await;
    assert!(matches!(controller.complete(&first, result), Ok(Some(_))));

    let second = controller.begin(&catalog, Some("103"), "").unwrap();
    let result = fetch_record(&cli, &second.entry_id).await;
    assert!(matches!(
        result,
        Err(VaultError::RecordParse(RecordParseError::EmptyArray))
    ));
    assert!(matches!(controller.complete(&second, result), Ok(None)));
    assert_eq!(controller.state().displayed_id(), Some("101"));
}

#[tokio::test]
async fn missing_tool_during_fetch_is_reported() {
    let catalog = Catalog::from_entries(vec![CatalogEntry::new("Email (Work)", "101")]);
    let cli = FakeVaultCli::new().unavailable();
    let mut controller = SelectionController::new();

    let ticket = controller.begin(&catalog, Some("101"), "").unwrap();
    let result = fetch_record(&cli, &ticket.entry_id).await;
    let err = controller.complete(&ticket, result).unwrap_err();

    assert!(matches!(err, VaultError::ToolUnavailable { .. }));
    assert_eq!(controller.state().displayed_id(), None);
    assert_eq!(cli.calls(), [VaultCall::Show("101".into())]);
}

async fn fetch_and_apply(
    cli: &FakeVaultCli,
    controller: &RefCell<SelectionController>,
    ticket: FetchTicket,
    shown: &RefCell<Vec<String>>,
) {
    let result = fetch_record(cli, &ticket.entry_id).await;
    if let Ok(Some(record)) = controller.borrow_mut().complete(&ticket, result) {
        shown.borrow_mut().push(record.name);
    }
}

#[tokio::test]
async fn slow_earlier_fetch_does_not_overwrite_later_selection() {
    let cli = vault().with_fetch_delay("103", Duration::from_millis(80));
    let catalog: Catalog = load_catalog(&cli, SyncMode::Now).await.unwrap();
    let controller = RefCell::new(SelectionController::new());
    let shown = RefCell::new(Vec::new());

    let slow = controller.borrow_mut().begin(&catalog, Some("103"), "").unwrap();
    let fast = controller.borrow_mut().begin(&catalog, Some("101"), "").unwrap();

    tokio::join!(
        fetch_and_apply(&cli, &controller, slow, &shown),
        fetch_and_apply(&cli, &controller, fast, &shown),
    );

    assert_eq!(*shown.borrow(), ["Email"]);
    assert_eq!(controller.borrow().state().displayed_id(), Some("101"));
}
