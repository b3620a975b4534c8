//! Mapping selector input to entry ids, and the selection lifecycle.
//!
//! [`resolve`] turns either a picked row or typed text into an entry id.
//! [`SelectionController`] tracks `Unselected -> Resolving -> Displaying`
//! and makes sure only the most recently requested fetch is ever shown:
//! a slow fetch for an earlier selection is dropped when it completes.

use tracing::{debug, error, info};

use crate::catalog::Catalog;
use crate::error::VaultError;
use crate::record::VaultRecord;

/// Resolves selector input to an entry id.
///
/// A picked row (`active_id`) wins unconditionally. Otherwise `typed_text`
/// must equal a display label exactly; the first match in sorted order is
/// used. `None` means nothing should be fetched.
#[must_use]
pub fn resolve(catalog: &Catalog, active_id: Option<&str>, typed_text: &str) -> Option<String> {
    if let Some(id) = active_id {
        return Some(id.to_string());
    }
    catalog
        .find_by_label(typed_text)
        .map(|entry| entry.entry_id.clone())
}

/// Where the selection currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing has been displayed yet.
    #[default]
    Unselected,
    /// A fetch is in flight.
    Resolving {
        /// Entry being fetched.
        entry_id: String,
        /// Request generation of the fetch.
        generation: u64,
        /// Entry shown before this request, if any.
        previous: Option<String>,
    },
    /// An entry's details are on screen.
    Displaying {
        /// Entry being shown.
        entry_id: String,
    },
}

impl SelectionState {
    /// Entry whose details are currently visible.
    #[must_use]
    pub fn displayed_id(&self) -> Option<&str> {
        match self {
            Self::Unselected => None,
            Self::Resolving { previous, .. } => previous.as_deref(),
            Self::Displaying { entry_id } => Some(entry_id),
        }
    }

    /// Returns true while a fetch is outstanding.
    #[must_use]
    pub const fn is_resolving(&self) -> bool {
        matches!(self, Self::Resolving { .. })
    }
}

/// Handle for one requested fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Entry to fetch.
    pub entry_id: String,
    generation: u64,
}

/// Drives the selection state machine for one window.
#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
    generation: u64,
}

impl SelectionController {
    /// Creates a controller in the `Unselected` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Starts a selection change.
    ///
    /// Returns the ticket to fetch with, or `None` when the input resolves
    /// to nothing or to an id missing from `catalog`; in that case the state
    /// is left exactly as it was.
    pub fn begin(
        &mut self,
        catalog: &Catalog,
        active_id: Option<&str>,
        typed_text: &str,
    ) -> Option<FetchTicket> {
        let Some(entry_id) = resolve(catalog, active_id, typed_text) else {
            debug!("Selector input matches no catalog entry");
            return None;
        };
        if !catalog.contains_id(&entry_id) {
            debug!(entry_id = %entry_id, "Resolved id is not in the catalog, skipping fetch");
            return None;
        }

        self.generation += 1;
        let previous = self.state.displayed_id().map(str::to_owned);
        self.state = SelectionState::Resolving {
            entry_id: entry_id.clone(),
            generation: self.generation,
            previous,
        };

        Some(FetchTicket {
            entry_id,
            generation: self.generation,
        })
    }

    /// Finishes a fetch.
    ///
    /// Returns the record to render when `ticket` is the latest request and
    /// the fetch succeeded. Stale tickets are ignored; failures restore the
    /// previously displayed state so the old fields stay visible.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when it is fatal (the vault tool is missing),
    /// whether or not the ticket is still current. Other failures yield
    /// `Ok(None)`.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<VaultRecord, VaultError>,
    ) -> Result<Option<VaultRecord>, VaultError> {
        if ticket.generation != self.generation || !self.state.is_resolving() {
            debug!(
                entry_id = %ticket.entry_id,
                ticket = ticket.generation,
                latest = self.generation,
                "Discarding stale fetch result"
            );
            return match result {
                Err(e) if e.is_fatal() => Err(e),
                _ => Ok(None),
            };
        }

        let previous = match &self.state {
            SelectionState::Resolving { previous, .. } => previous.clone(),
            _ => None,
        };

        match result {
            Ok(record) => {
                self.state = SelectionState::Displaying {
                    entry_id: ticket.entry_id.clone(),
                };
                Ok(Some(record))
            }
            Err(e) => {
                self.state = previous.map_or(SelectionState::Unselected, |entry_id| {
                    SelectionState::Displaying { entry_id }
                });
                if e.is_fatal() {
                    error!(entry_id = %ticket.entry_id, error = %e, "Vault client unavailable");
                    return Err(e);
                }
                info!(entry_id = %ticket.entry_id, error = %e, "Entry unavailable, keeping current details");
                Ok(None)
            }
        }
    }

    /// Forgets everything, e.g. after the catalog was reloaded.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = SelectionState::Unselected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::error::RecordParseError;

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            CatalogEntry::new("Bank (Personal)", "103"),
            CatalogEntry::new("Email (Work)", "101"),
        ])
    }

    fn record(name: &str) -> VaultRecord {
        VaultRecord::new(name, "", "", "", "")
    }

    #[test]
    fn active_id_wins() {
        assert_eq!(resolve(&catalog(), Some("999"), "Email (Work)"), Some("999".into()));
        assert_eq!(resolve(&Catalog::empty(), Some("1"), ""), Some("1".into()));
    }

    #[test]
    fn typed_text_needs_exact_label() {
        let catalog = catalog();
        assert_eq!(resolve(&catalog, None, "Email (Work)"), Some("101".into()));
        assert_eq!(resolve(&catalog, None, "Email"), None);
        assert_eq!(resolve(&catalog, None, "email (work)"), None);
        assert_eq!(resolve(&catalog, None, ""), None);
    }

    #[test]
    fn successful_fetch_displays() {
        let catalog = catalog();
        let mut controller = SelectionController::new();
        let ticket = controller.begin(&catalog, Some("101"), "").unwrap();
        assert!(controller.state().is_resolving());

        let shown = controller.complete(&ticket, Ok(record("Email"))).unwrap();
        assert_eq!(shown.map(|r| r.name), Some("Email".into()));
        assert_eq!(controller.state().displayed_id(), Some("101"));
    }

    #[test]
    fn miss_leaves_state_untouched() {
        let catalog = catalog();
        let mut controller = SelectionController::new();
        let ticket = controller.begin(&catalog, None, "Bank (Personal)").unwrap();
        controller.complete(&ticket, Ok(record("Bank"))).unwrap();

        assert!(controller.begin(&catalog, None, "Ban").is_none());
        assert!(controller.begin(&catalog, Some("555"), "").is_none());
        assert_eq!(
            controller.state(),
            &SelectionState::Displaying {
                entry_id: "103".into()
            }
        );
    }

    #[test]
    fn failed_fetch_restores_previous() {
        let catalog = catalog();
        let mut controller = SelectionController::new();

        let first = controller.begin(&catalog, Some("103"), "").unwrap();
        controller.complete(&first, Ok(record("Bank"))).unwrap();

        let second = controller.begin(&catalog, Some("101"), "").unwrap();
        let shown = controller.complete(&second, Err(RecordParseError::EmptyArray.into()));
        assert!(matches!(shown, Ok(None)));
        assert_eq!(controller.state().displayed_id(), Some("103"));
        assert!(!controller.state().is_resolving());
    }

    #[test]
    fn failed_first_fetch_returns_to_unselected() {
        let catalog = catalog();
        let mut controller = SelectionController::new();
        let ticket = controller.begin(&catalog, Some("101"), "").unwrap();
        let err = VaultError::ToolFailed {
            command: "lpass show".into(),
            code: Some(1),
            stderr: String::new(),
        };
        assert!(matches!(controller.complete(&ticket, Err(err)), Ok(None)));
        assert_eq!(controller.state(), &SelectionState::Unselected);
    }

    #[test]
    fn last_requested_wins() {
        let catalog = catalog();
        let mut controller = SelectionController::new();

        let slow = controller.begin(&catalog, Some("103"), "").unwrap();
        let fast = controller.begin(&catalog, Some("101"), "").unwrap();

        assert!(matches!(controller.complete(&fast, Ok(record("Email"))), Ok(Some(_))));
        assert!(matches!(controller.complete(&slow, Ok(record("Bank"))), Ok(None)));
        assert_eq!(controller.state().displayed_id(), Some("101"));
    }

    #[test]
    fn reset_invalidates_outstanding_tickets() {
        let catalog = catalog();
        let mut controller = SelectionController::new();
        let ticket = controller.begin(&catalog, Some("103"), "").unwrap();
        controller.reset();
        assert!(matches!(controller.complete(&ticket, Ok(record("Bank"))), Ok(None)));
        assert_eq!(controller.state(), &SelectionState::Unselected);
    }

    fn missing_tool() -> VaultError {
        VaultError::ToolUnavailable {
            program: "lpass".into(),
            reason: "No such file or directory (os error 2)".into(),
        }
    }

    #[test]
    fn missing_tool_is_reported() {
        let catalog = catalog();
        let mut controller = SelectionController::new();

        let first = controller.begin(&catalog, Some("103"), "").unwrap();
        controller.complete(&first, Ok(record("Bank"))).unwrap();

        let second = controller.begin(&catalog, Some("101"), "").unwrap();
        let err = controller.complete(&second, Err(missing_tool())).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(controller.state().displayed_id(), Some("103"));
        assert!(!controller.state().is_resolving());
    }

    #[test]
    fn missing_tool_is_reported_for_stale_tickets() {
        let catalog = catalog();
        let mut controller = SelectionController::new();
        let slow = controller.begin(&catalog, Some("103"), "").unwrap();
        let fast = controller.begin(&catalog, Some("101"), "").unwrap();

        assert!(controller.complete(&slow, Err(missing_tool())).is_err());
        assert!(controller.state().is_resolving());
        assert!(matches!(controller.complete(&fast, Ok(record("Email"))), Ok(Some(_))));
    }
}
