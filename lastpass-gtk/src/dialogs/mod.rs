//! Dialog windows for `lastpass-gtk`.

mod login;

pub use login::LoginDialog;

use adw::prelude::*;
use libadwaita as adw;
use std::cell::RefCell;
use tokio::sync::oneshot;

/// Presents an alert dialog and waits for the chosen response id.
///
/// Closing the dialog yields its close response.
pub async fn choose(dialog: &adw::AlertDialog, parent: Option<&gtk4::Widget>) -> String {
    let (tx, rx) = oneshot::channel::<String>();
    let sender = RefCell::new(Some(tx));
    dialog.connect_response(None, move |_, response| {
        if let Some(tx) = sender.borrow_mut().take() {
            let _ = tx.send(response.to_string());
        }
    });

    dialog.present(parent);

    rx.await.unwrap_or_else(|_| dialog.close_response().to_string())
}

/// Shows an error and waits until it is dismissed.
pub async fn show_error(title: &str, message: &str, parent: Option<&gtk4::Widget>) {
    let dialog = adw::AlertDialog::new(Some(title), Some(message));
    dialog.add_response("ok", "OK");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");

    choose(&dialog, parent).await;
}
