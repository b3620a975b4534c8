//! Window state shared between GTK callbacks.
//!
//! GTK is single-threaded, so the state lives in an `Rc<RefCell<_>>`.
//! Borrows must never be held across an `.await`; callers copy out what
//! they need (the vault handle, a fetch ticket) before suspending.

use std::cell::RefCell;
use std::rc::Rc;

use lastpass_gtk_core::catalog::Catalog;
use lastpass_gtk_core::config::AppSettings;
use lastpass_gtk_core::error::VaultError;
use lastpass_gtk_core::record::{RecordView, VaultRecord};
use lastpass_gtk_core::selection::{FetchTicket, SelectionController};
use lastpass_gtk_core::vault::VaultCli;

/// Catalog, selection and vault handle behind the main window.
pub struct WindowState {
    settings: AppSettings,
    vault: Rc<dyn VaultCli>,
    catalog: Catalog,
    controller: SelectionController,
}

/// Shared, mutable window state.
pub type SharedWindowState = Rc<RefCell<WindowState>>;

impl WindowState {
    /// Creates state for a freshly loaded catalog.
    #[must_use]
    pub fn new(settings: AppSettings, vault: Rc<dyn VaultCli>, catalog: Catalog) -> Self {
        Self {
            settings,
            vault,
            catalog,
            controller: SelectionController::new(),
        }
    }

    /// Returns the loaded settings.
    pub const fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Returns a handle to the vault client for use in async tasks.
    pub fn vault(&self) -> Rc<dyn VaultCli> {
        Rc::clone(&self.vault)
    }

    /// Returns the current catalog.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replaces the catalog; selections in flight are dropped.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.controller.reset();
    }

    /// Resolves the selector input; `None` means nothing should be fetched.
    pub fn begin_selection(&mut self, active_id: Option<&str>, typed_text: &str) -> Option<FetchTicket> {
        self.controller.begin(&self.catalog, active_id, typed_text)
    }

    /// Applies a finished fetch and returns what to display, if anything.
    ///
    /// Only a fatal vault error is returned; the caller reports it.
    pub fn finish_selection(
        &mut self,
        ticket: &FetchTicket,
        result: Result<VaultRecord, VaultError>,
    ) -> Result<Option<RecordView>, VaultError> {
        let record = self.controller.complete(ticket, result)?;
        Ok(record.map(|record| RecordView::from_record(&record)))
    }

    /// Id of the entry whose details are on screen.
    pub fn displayed_id(&self) -> Option<&str> {
        self.controller.state().displayed_id()
    }
}

/// Creates new shared window state.
pub fn create_shared_state(
    settings: AppSettings,
    vault: Rc<dyn VaultCli>,
    catalog: Catalog,
) -> SharedWindowState {
    Rc::new(RefCell::new(WindowState::new(settings, vault, catalog)))
}
