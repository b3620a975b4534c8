//! Property tests for listing parsing.

use lastpass_gtk_core::catalog::{parse_line, parse_listing};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _.-]{1,12}".prop_filter("no edge spaces", |s| s.trim() == s)
}

fn group_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..4).prop_map(|parts| parts.join("/"))
}

fn listing_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (group_path(), segment(), 1u32..1_000_000)
            .prop_map(|(group, leaf, id)| format!("{group}/{leaf} [id: {id}]")),
        (group_path(), 1u32..1_000_000).prop_map(|(group, id)| format!("{group}/ [id: {id}]")),
        "[a-z ]{0,20}",
    ]
}

proptest! {
    #[test]
    fn parsing_is_deterministic(lines in prop::collection::vec(listing_line(), 0..40)) {
        let raw = lines.join("\n");
        prop_assert_eq!(parse_listing(&raw), parse_listing(&raw));
    }

    #[test]
    fn label_is_leaf_then_group(group in group_path(), leaf in segment(), id in 1u32..1_000_000) {
        let entry = parse_line(&format!("{group}/{leaf} [id: {id}]")).unwrap();
        prop_assert_eq!(entry.display_label, format!("{leaf} ({group})"));
        prop_assert_eq!(entry.entry_id, id.to_string());
    }

    #[test]
    fn empty_leaf_never_listed(group in group_path(), id in 1u32..1_000_000) {
        let line = format!("{group}/ [id: {id}]");
        prop_assert!(parse_line(&line).is_none());
    }

    #[test]
    fn catalog_is_sorted_and_leafs_non_empty(lines in prop::collection::vec(listing_line(), 0..40)) {
        let catalog = parse_listing(&lines.join("\n"));
        let entries = catalog.entries();
        for pair in entries.windows(2) {
            prop_assert!(
                (&pair[0].display_label, &pair[0].entry_id)
                    <= (&pair[1].display_label, &pair[1].entry_id)
            );
        }
        for entry in entries {
            prop_assert!(!entry.display_label.starts_with(" ("));
        }
    }

    #[test]
    fn line_order_does_not_matter(lines in prop::collection::vec(listing_line(), 0..20)) {
        let forward = parse_listing(&lines.join("\n"));
        let mut reversed = lines.clone();
        reversed.reverse();
        prop_assert_eq!(forward, parse_listing(&reversed.join("\n")));
    }

    #[test]
    fn line_terminator_does_not_matter(lines in prop::collection::vec(listing_line(), 0..20)) {
        let unix = parse_listing(&lines.join("\n"));
        prop_assert_eq!(&unix, &parse_listing(&lines.join("\r\n")));
        prop_assert_eq!(&unix, &parse_listing(&lines.join("\r")));
    }
}
