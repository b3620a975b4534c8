//! Property tests for selection resolution.

use lastpass_gtk_core::catalog::{Catalog, CatalogEntry};
use lastpass_gtk_core::record::VaultRecord;
use lastpass_gtk_core::selection::{SelectionController, resolve};
use proptest::prelude::*;

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(("[A-Z][a-z]{0,6} \\([A-Z][a-z]{0,6}\\)", 1u32..500), 0..30).prop_map(
        |pairs| {
            Catalog::from_entries(
                pairs
                    .into_iter()
                    .map(|(label, id)| CatalogEntry::new(label, id.to_string()))
                    .collect(),
            )
        },
    )
}

proptest! {
    #[test]
    fn active_id_returned_unchanged(catalog in catalog_strategy(), id in "[0-9]{1,6}", typed in ".{0,20}") {
        prop_assert_eq!(resolve(&catalog, Some(id.as_str()), &typed), Some(id.clone()));
    }

    #[test]
    fn typed_label_resolves_to_first_sorted_match(catalog in catalog_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!catalog.is_empty());
        let label = &catalog.entries()[pick.index(catalog.len())].display_label;
        let expected = catalog
            .iter()
            .find(|e| &e.display_label == label)
            .map(|e| e.entry_id.clone());
        prop_assert_eq!(resolve(&catalog, None, label), expected);
    }

    #[test]
    fn only_the_latest_ticket_is_applied(catalog in catalog_strategy(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..8)) {
        prop_assume!(!catalog.is_empty());
        let mut controller = SelectionController::new();
        let tickets: Vec<_> = picks
            .iter()
            .map(|p| {
                let id = catalog.entries()[p.index(catalog.len())].entry_id.clone();
                controller.begin(&catalog, Some(id.as_str()), "").unwrap()
            })
            .collect();

        let (latest, earlier) = tickets.split_last().unwrap();
        for ticket in earlier {
            let record = VaultRecord::new(&ticket.entry_id, "", "", "", "");
            prop_assert!(matches!(controller.complete(ticket, Ok(record)), Ok(None)));
        }
        let record = VaultRecord::new(&latest.entry_id, "", "", "", "");
        prop_assert!(matches!(controller.complete(latest, Ok(record)), Ok(Some(_))));
        prop_assert_eq!(controller.state().displayed_id(), Some(latest.entry_id.as_str()));
    }
}
