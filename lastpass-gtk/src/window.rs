//! Main window: entry selector above the detail labels.
//!
//! The selector is a combo box with an editable entry and completion over
//! the catalog labels. Every change is resolved against the catalog; only a
//! resolved id triggers a fetch, and only the most recent fetch is shown.

// ComboBoxText and EntryCompletion are deprecated since GTK 4.10 but remain
// the only widgets offering a free-text entry with a popup list.
#![allow(deprecated)]

use adw::prelude::*;
use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Orientation, gio};
use libadwaita as adw;
use std::rc::Rc;

use lastpass_gtk_core::catalog::{Catalog, load_catalog};
use lastpass_gtk_core::error::VaultError;
use lastpass_gtk_core::record::{RecordView, fetch_record};
use lastpass_gtk_core::vault::SyncMode;

use crate::async_utils::{spawn_async, spawn_async_with_callback};
use crate::dialogs;
use crate::error::AppStateError;
use crate::markup;
use crate::state::SharedWindowState;

/// Labels of the detail pane.
struct DetailLabels {
    name: gtk4::Label,
    url: gtk4::Label,
    username: gtk4::Label,
    password: gtk4::Label,
    note: gtk4::Label,
}

impl DetailLabels {
    fn new() -> Self {
        let blank = RecordView::blank();
        Self {
            name: detail_label(&blank.name, false),
            url: detail_label(&markup::url_markup(&blank.url), true),
            username: detail_label(&blank.username, false),
            password: detail_label(&blank.password, false),
            note: detail_label(&markup::note_markup(&blank.note), true),
        }
    }

    fn show(&self, view: &RecordView) {
        self.name.set_label(&view.name);
        self.url.set_markup(&markup::url_markup(&view.url));
        self.username.set_label(&view.username);
        self.password.set_label(&view.password);
        self.note.set_markup(&markup::note_markup(&view.note));
    }
}

fn detail_label(text: &str, markup: bool) -> gtk4::Label {
    let label = gtk4::Label::builder()
        .selectable(true)
        .xalign(0.0)
        .wrap(true)
        .build();
    if markup {
        label.set_markup(text);
    } else {
        label.set_label(text);
    }
    label
}

/// Shows a vault error that leaves the window unusable.
fn report_vault_error(parent: &adw::ApplicationWindow, error: VaultError) {
    let error = AppStateError::from(error);
    let parent = parent.clone();
    spawn_async(async move {
        let parent = parent.upcast_ref::<gtk4::Widget>();
        dialogs::show_error(error.title(), &error.to_string(), Some(parent)).await;
    });
}

/// The browser window.
pub struct MainWindow {
    window: adw::ApplicationWindow,
    selector: gtk4::ComboBoxText,
    details: Rc<DetailLabels>,
    state: SharedWindowState,
}

impl MainWindow {
    /// Builds the window around the loaded catalog.
    #[must_use]
    pub fn new(app: &adw::Application, state: SharedWindowState) -> Rc<Self> {
        let (width, height, border) = {
            let state_ref = state.borrow();
            let ui = &state_ref.settings().ui;
            (ui.width as i32, ui.height as i32, ui.border_width as i32)
        };

        let window = adw::ApplicationWindow::builder()
            .application(app)
            .title("LastPass")
            .default_width(width)
            .default_height(height)
            .build();

        let selector = gtk4::ComboBoxText::with_entry();
        let details = Rc::new(DetailLabels::new());

        let content = GtkBox::new(Orientation::Vertical, 2);
        content.set_margin_top(border);
        content.set_margin_bottom(border);
        content.set_margin_start(border);
        content.set_margin_end(border);

        content.append(&selector);
        content.append(&details.name);
        content.append(&details.url);
        content.append(&details.username);
        content.append(&details.password);

        let note_header = gtk4::Label::builder().label("Note").xalign(0.0).build();
        note_header.add_css_class("heading");
        content.append(&note_header);
        content.append(&details.note);

        window.set_content(Some(&content));

        let main_window = Rc::new(Self {
            window,
            selector,
            details,
            state,
        });

        main_window.setup_completion();
        main_window.populate();
        main_window.connect_selector();
        main_window.setup_actions();

        main_window
    }

    /// Shows the window and focuses the selector entry.
    pub fn present(&self) {
        self.window.present();
        if let Some(entry) = self.entry() {
            entry.grab_focus();
        }
    }

    fn entry(&self) -> Option<gtk4::Entry> {
        self.selector.child().and_downcast::<gtk4::Entry>()
    }

    fn setup_completion(&self) {
        let Some(entry) = self.entry() else {
            tracing::warn!("Selector has no entry; completion disabled");
            return;
        };
        let completion = gtk4::EntryCompletion::new();
        completion.set_model(self.selector.model().as_ref());
        completion.set_text_column(0);
        completion.set_inline_completion(true);
        entry.set_completion(Some(&completion));
    }

    /// Fills the selector from the catalog; an empty catalog disables it.
    fn populate(&self) {
        // Selector updates emit `changed`, which borrows the state again.
        let rows: Vec<(String, String)> = self
            .state
            .borrow()
            .catalog()
            .iter()
            .map(|e| (e.entry_id.clone(), e.display_label.clone()))
            .collect();

        self.selector.remove_all();
        for (id, label) in &rows {
            self.selector.append(Some(id), label);
        }
        self.selector.set_sensitive(!rows.is_empty());
        tracing::debug!(entries = rows.len(), "Selector populated");
    }

    // Handlers hold the window strongly; GTK drops them when it is destroyed.
    fn connect_selector(self: &Rc<Self>) {
        let this = Rc::clone(self);
        self.selector.connect_changed(move |_| this.show_selection());
    }

    /// Resolves the selector input and fetches the entry it names.
    fn show_selection(&self) {
        let active_id = self.selector.active_id();
        let typed = self.selector.active_text().unwrap_or_default();

        let Some(ticket) = self
            .state
            .borrow_mut()
            .begin_selection(active_id.as_deref(), &typed)
        else {
            return;
        };

        let vault = self.state.borrow().vault();
        let state = self.state.clone();
        let details = self.details.clone();
        let parent = self.window.clone();
        spawn_async(async move {
            let result = fetch_record(vault.as_ref(), &ticket.entry_id).await;
            let outcome = state.borrow_mut().finish_selection(&ticket, result);
            match outcome {
                Ok(Some(view)) => details.show(&view),
                Ok(None) => {}
                Err(e) => report_vault_error(&parent, e),
            }
        });
    }

    /// Reloads the catalog from the local `lpass` cache.
    fn refresh(self: &Rc<Self>) {
        let vault = self.state.borrow().vault();
        let window = Rc::clone(self);
        spawn_async_with_callback(
            async move { load_catalog(vault.as_ref(), SyncMode::No).await },
            move |result| {
                let catalog = match result {
                    Ok(catalog) => catalog,
                    Err(e) => {
                        tracing::error!(error = %e, "Catalog refresh failed");
                        if e.is_fatal() {
                            report_vault_error(&window.window, e);
                        }
                        Catalog::empty()
                    }
                };
                tracing::info!(
                    entries = catalog.len(),
                    previous = ?window.state.borrow().displayed_id(),
                    "Catalog refreshed; clearing displayed entry"
                );
                window.state.borrow_mut().replace_catalog(catalog);
                if let Some(entry) = window.entry() {
                    entry.set_text("");
                }
                window.details.show(&RecordView::blank());
                window.populate();
            },
        );
    }

    fn setup_actions(self: &Rc<Self>) {
        let close_action = gio::SimpleAction::new("close", None);
        let window_weak = self.window.downgrade();
        close_action.connect_activate(move |_, _| {
            if let Some(window) = window_weak.upgrade() {
                window.close();
            }
        });
        self.window.add_action(&close_action);

        let activate_action = gio::SimpleAction::new("activate-entry", None);
        let this = Rc::clone(self);
        activate_action.connect_activate(move |_, _| this.show_selection());
        self.window.add_action(&activate_action);

        let refresh_action = gio::SimpleAction::new("refresh", None);
        let this = Rc::clone(self);
        refresh_action.connect_activate(move |_, _| this.refresh());
        self.window.add_action(&refresh_action);
    }
}
