//! Login prompt shown when `lpass` has no session
//!
//! Only the account identifier is asked for here; `lpass` requests the
//! master password itself through its own pinentry.

use adw::prelude::*;
use async_trait::async_trait;
use gtk4::prelude::*;
use libadwaita as adw;
use lastpass_gtk_core::session::CredentialPrompt;

const RESPONSE_CANCEL: &str = "cancel";
const RESPONSE_LOGIN: &str = "login";

/// Modal prompt for the LastPass account identifier
pub struct LoginDialog {
    dialog: adw::AlertDialog,
    entry: gtk4::Entry,
}

impl LoginDialog {
    /// Creates the dialog; nothing is shown until it is asked
    #[must_use]
    pub fn new() -> Self {
        let dialog = adw::AlertDialog::builder()
            .heading("LastPass Login")
            .body("Enter the email address of your LastPass account.")
            .build();
        dialog.add_response(RESPONSE_CANCEL, "Cancel");
        dialog.add_response(RESPONSE_LOGIN, "Log In");
        dialog.set_response_appearance(RESPONSE_LOGIN, adw::ResponseAppearance::Suggested);
        dialog.set_default_response(Some(RESPONSE_LOGIN));
        dialog.set_close_response(RESPONSE_CANCEL);

        let entry = gtk4::Entry::builder()
            .placeholder_text("user@example.com")
            .input_purpose(gtk4::InputPurpose::Email)
            .activates_default(true)
            .build();
        dialog.set_extra_child(Some(&entry));

        Self { dialog, entry }
    }
}

impl Default for LoginDialog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl CredentialPrompt for LoginDialog {
    async fn prompt_identifier(&self) -> Option<String> {
        self.entry.set_text("");
        let response = super::choose(&self.dialog, None).await;
        if response == RESPONSE_LOGIN {
            Some(self.entry.text().to_string())
        } else {
            tracing::debug!("Login prompt dismissed");
            None
        }
    }
}
