//! GTK4 Application setup and initialization
//!
//! Activation runs the startup sequence as a main-context task: make sure
//! `lpass` has a session, load the catalog, then build and present the
//! window. The application is held for the duration so it does not quit
//! before a window exists.

use adw::prelude::*;
use gtk4::{gio, glib};
use libadwaita as adw;
use std::rc::Rc;

use lastpass_gtk_core::catalog::{Catalog, load_catalog};
use lastpass_gtk_core::config::{AppSettings, default_keybindings};
use lastpass_gtk_core::session::{AuthOutcome, ensure_authenticated};
use lastpass_gtk_core::vault::{LpassCli, VaultCli};

use crate::async_utils::spawn_async;
use crate::dialogs::{LoginDialog, show_error};
use crate::error::AppStateError;
use crate::state::create_shared_state;
use crate::window::MainWindow;

/// Application ID for `lastpass-gtk`
pub const APP_ID: &str = "org.lastpass.gtk";

/// Creates and configures the GTK4 Application
#[must_use]
pub fn create_application(settings: AppSettings) -> adw::Application {
    let app = adw::Application::builder()
        .application_id(APP_ID)
        .flags(gio::ApplicationFlags::default())
        .build();

    app.connect_activate(move |app| {
        if let Some(window) = app.active_window() {
            window.present();
            return;
        }
        spawn_async(start(app.clone(), settings.clone()));
    });

    app
}

async fn start(app: adw::Application, settings: AppSettings) {
    let _hold = app.hold();
    let vault: Rc<dyn VaultCli> = Rc::new(LpassCli::from_settings(&settings.vault));

    match open_vault(vault.as_ref(), &settings).await {
        Ok(Some(catalog)) => {
            tracing::debug!(entries = catalog.len(), "Opening window");
            let state = create_shared_state(settings.clone(), vault, catalog);
            let window = MainWindow::new(&app, state);
            apply_keybindings(&app, &settings);
            window.present();
        }
        Ok(None) => {
            tracing::info!("No LastPass session; exiting");
        }
        Err(e) => {
            tracing::error!(%e, "Startup failed");
            show_error(e.title(), &e.to_string(), None).await;
        }
    }
}

/// Authenticates and loads the catalog; `None` when the user is not logged in
async fn open_vault(
    vault: &dyn VaultCli,
    settings: &AppSettings,
) -> Result<Option<Catalog>, AppStateError> {
    let prompt = LoginDialog::new();
    match ensure_authenticated(vault, &prompt).await? {
        AuthOutcome::Authenticated => {}
        AuthOutcome::Cancelled => return Ok(None),
        AuthOutcome::Failed { .. } => {
            tracing::warn!("LastPass login failed");
            return Ok(None);
        }
    }

    Ok(Some(load_catalog(vault, settings.vault.listing_sync).await?))
}

/// Applies keyboard shortcuts from settings, falling back to defaults.
pub fn apply_keybindings(app: &adw::Application, settings: &AppSettings) {
    for def in &default_keybindings() {
        let accels = settings.keybindings.accels_for(def);
        app.set_accels_for_action(def.action, &accels);
    }
}

/// Runs the GTK4 application
///
/// # Returns
///
/// Returns `glib::ExitCode::FAILURE` if libadwaita initialization fails,
/// otherwise returns the application's exit code.
pub fn run(settings: AppSettings) -> glib::ExitCode {
    if let Err(e) = adw::init() {
        tracing::error!(%e, "Failed to initialize libadwaita");
        return glib::ExitCode::FAILURE;
    }

    let app = create_application(settings);
    // GTK would otherwise try to parse the process arguments.
    app.run_with_args::<&str>(&[])
}
