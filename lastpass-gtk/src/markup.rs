//! Pango markup for the detail labels.

use gtk4::glib;

/// URL label: a link to the site, or just the caption when there is none.
pub fn url_markup(url: &str) -> String {
    if url.is_empty() {
        return "URL: ".to_string();
    }
    let url = glib::markup_escape_text(url);
    format!("URL: <a href='{url}'>{url}</a>")
}

/// Note label body with markup characters escaped.
pub fn note_markup(note: &str) -> String {
    glib::markup_escape_text(note).to_string()
}
