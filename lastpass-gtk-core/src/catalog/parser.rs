//! Parser for `lpass ls --color=never` output.
//!
//! Each useful line looks like `Group/Sub/Name [id: 1234]`. Anything else
//! (blank lines, folder headers, warnings printed by lpass) is skipped.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{Catalog, CatalogEntry};

static LISTING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+) \[id: (?P<id>\d+)\]$").expect("LISTING_LINE is a valid regex pattern")
});

/// Why a listing line produced no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    NoMatch,
    EmptyLeaf,
}

/// Splits a full entry path on its last `/` into `(group, leaf)`.
///
/// A path without any separator has no group; the group is returned empty.
#[must_use]
pub fn split_path(full_path: &str) -> (&str, &str) {
    full_path
        .rsplit_once('/')
        .unwrap_or(("", full_path))
}

fn classify(line: &str) -> Result<CatalogEntry, Skip> {
    let caps = LISTING_LINE.captures(line).ok_or(Skip::NoMatch)?;
    let (group, leaf) = split_path(&caps["name"]);
    if leaf.is_empty() {
        return Err(Skip::EmptyLeaf);
    }
    Ok(CatalogEntry::from_parts(leaf, group, &caps["id"]))
}

const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits listing text into lines.
///
/// Besides `\n` and `\r\n`, a lone `\r` and the other Unicode line
/// separators end a line too.
fn listing_lines(raw_listing: &str) -> impl Iterator<Item = &str> {
    raw_listing
        .split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split(is_line_break))
}

/// Parses a single listing line.
#[must_use]
pub fn parse_line(line: &str) -> Option<CatalogEntry> {
    classify(line.trim_end_matches('\r')).ok()
}

/// Parses a full listing into a sorted catalog.
///
/// Pure and deterministic: the same text always gives the same catalog.
#[must_use]
pub fn parse_listing(raw_listing: &str) -> Catalog {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in listing_lines(raw_listing).enumerate() {
        match classify(line) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                skipped += 1;
                debug!(line_number = index + 1, ?reason, "Skipping listing line");
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, parsed = entries.len(), "Listing parsed with skipped lines");
    }

    Catalog::from_entries(entries)
}
