//! `lastpass-gtk` - LastPass entry browser.
//!
//! A small GTK4/libadwaita window that lists the vault through the `lpass`
//! command-line client and shows the details of the chosen entry.
//!
//! # Async model
//!
//! Vault calls are async and driven by the GLib main context (see
//! [`async_utils`]). A multi-threaded tokio runtime is entered for the
//! lifetime of the process so that `tokio::process` and timers have a
//! reactor to register with.

#![allow(clippy::too_many_lines)] // GUI setup functions are inherently long
#![allow(clippy::missing_errors_doc)] // Internal GUI functions don't need error docs
#![allow(clippy::missing_panics_doc)] // Internal GUI functions don't need panic docs

mod app;
mod async_utils;
mod dialogs;
mod error;
mod markup;
mod state;
mod window;

use lastpass_gtk_core::config::{AppSettings, ConfigManager};
use lastpass_gtk_core::tracing::init_tracing;

use crate::error::AppStateError;

/// Loads settings, falling back to defaults on any error.
fn load_settings() -> (AppSettings, Option<AppStateError>) {
    match ConfigManager::new().and_then(|manager| manager.load_settings()) {
        Ok(settings) => (settings, None),
        Err(e) => (AppSettings::default(), Some(e.into())),
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime, AppStateError> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .map_err(|e| AppStateError::InitializationFailed {
            component: "async runtime",
            reason: e.to_string(),
        })
}

fn main() -> gtk4::glib::ExitCode {
    let (settings, settings_error) = load_settings();

    if let Err(e) = init_tracing(&settings.logging.tracing_config()) {
        eprintln!("Warning: {e}");
    }
    if let Some(e) = settings_error {
        tracing::warn!(%e, "Using default settings");
    }

    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(%e, "Cannot start");
            return gtk4::glib::ExitCode::FAILURE;
        }
    };
    let _guard = runtime.enter();

    app::run(settings)
}
