//! Entry catalog built from `lpass ls` output.
//!
//! The catalog is the sorted list of `(display_label, entry_id)` pairs shown
//! in the entry selector. It is built once per window by [`load_catalog`]
//! and replaced wholesale on refresh; nothing mutates it in between.

mod parser;

use std::collections::HashMap;

use tracing::{info, warn};

use crate::error::{VaultError, VaultResult};
use crate::vault::{SyncMode, VaultCli};

pub use parser::{parse_line, parse_listing, split_path};

/// One selectable vault entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CatalogEntry {
    /// `"<leaf> (<group path>)"`, not guaranteed unique.
    pub display_label: String,
    /// Opaque numeric id assigned by LastPass.
    pub entry_id: String,
}

impl CatalogEntry {
    /// Creates an entry from an already formatted label.
    #[must_use]
    pub fn new(display_label: impl Into<String>, entry_id: impl Into<String>) -> Self {
        Self {
            display_label: display_label.into(),
            entry_id: entry_id.into(),
        }
    }

    /// Builds the label from a leaf name and its group path.
    #[must_use]
    pub fn from_parts(leaf: &str, group: &str, entry_id: impl Into<String>) -> Self {
        Self::new(format!("{leaf} ({group})"), entry_id)
    }
}

/// Sorted, immutable set of catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_label: HashMap<String, usize>,
}

impl Catalog {
    /// Sorts `entries` by label then id and indexes the labels.
    #[must_use]
    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> Self {
        entries.sort();

        let mut by_label = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            // First entry in sorted order wins for duplicate labels
            by_label
                .entry(entry.display_label.clone())
                .or_insert(index);
        }

        Self { entries, by_label }
    }

    /// Empty catalog, used when the listing could not be loaded.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there is nothing to select.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Iterates entries in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Looks up the first entry whose label equals `label` exactly.
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<&CatalogEntry> {
        self.by_label.get(label).map(|&index| &self.entries[index])
    }

    /// Returns true if some entry carries `entry_id`.
    #[must_use]
    pub fn contains_id(&self, entry_id: &str) -> bool {
        self.entries.iter().any(|e| e.entry_id == entry_id)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Lists the vault and parses the result into a catalog.
///
/// A failing `lpass ls` yields an empty catalog so the selector can still be
/// shown (disabled).
///
/// # Errors
/// Only when the vault tool itself is unavailable.
pub async fn load_catalog(cli: &dyn VaultCli, sync: SyncMode) -> VaultResult<Catalog> {
    let raw = match cli.list_raw(sync).await {
        Ok(raw) => raw,
        Err(e @ VaultError::ToolUnavailable { .. }) => return Err(e),
        Err(e) => {
            warn!(error = %e, "Listing vault entries failed, using an empty catalog");
            return Ok(Catalog::empty());
        }
    };

    let catalog = parse_listing(&raw);
    info!(entries = catalog.len(), sync = %sync, "Catalog loaded");
    Ok(catalog)
}
