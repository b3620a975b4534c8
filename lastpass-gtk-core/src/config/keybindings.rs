//! Keyboard shortcut configuration.
//!
//! Provides [`KeybindingSettings`] for user overrides and
//! [`default_keybindings`] for the built-in registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Close the window.
pub const ACTION_CLOSE: &str = "win.close";
/// Resolve the text typed into the selector.
pub const ACTION_ACTIVATE_ENTRY: &str = "win.activate-entry";
/// Reload the catalog from the local cache.
pub const ACTION_REFRESH: &str = "win.refresh";

/// Custom keybinding overrides stored in user settings.
///
/// Each entry maps a GTK action name (e.g. `"win.refresh"`) to one or more
/// accelerators separated by `|` (e.g. `"<Control>r|F5"`). Actions not
/// present in `overrides` use their built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingSettings {
    /// Action name → accelerator string mapping.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub overrides: HashMap<String, String>,
}

/// A window action and the accelerators it is bound to out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeybindingDef {
    /// GTK action name, e.g. `"win.close"`.
    pub action: &'static str,
    /// Default accelerators, `|`-separated.
    pub default_accels: &'static str,
}

fn split_accels(accels: &str) -> Vec<&str> {
    accels
        .split('|')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect()
}

impl KeybindingSettings {
    /// Accelerator list for an action, ready for `set_accels_for_action`.
    ///
    /// An override that is empty or contains anything that is not an
    /// accelerator is ignored in favour of the defaults.
    #[must_use]
    pub fn accels_for<'a>(&'a self, def: &KeybindingDef) -> Vec<&'a str> {
        if let Some(custom) = self.overrides.get(def.action) {
            let accels = split_accels(custom);
            if !accels.is_empty() && accels.iter().all(|a| is_valid_accelerator(a)) {
                return accels;
            }
            warn!(action = def.action, accels = %custom, "Ignoring invalid shortcut override");
        }
        split_accels(def.default_accels)
    }
}

/// Returns the built-in keybinding registry.
#[must_use]
pub const fn default_keybindings() -> [KeybindingDef; 3] {
    [
        KeybindingDef {
            action: ACTION_CLOSE,
            default_accels: "Escape",
        },
        KeybindingDef {
            action: ACTION_ACTIVATE_ENTRY,
            default_accels: "Return|KP_Enter",
        },
        KeybindingDef {
            action: ACTION_REFRESH,
            default_accels: "<Control>r|F5",
        },
    ]
}

/// Checks whether a string looks like a GTK accelerator.
///
/// This is a lightweight check: an optional run of `<Modifier>` groups
/// followed by a non-empty key name.
#[must_use]
pub fn is_valid_accelerator(accel: &str) -> bool {
    let mut rest = accel.trim();
    while let Some(stripped) = rest.strip_prefix('<') {
        let Some(end) = stripped.find('>') else {
            return false;
        };
        if end == 0 {
            return false;
        }
        rest = &stripped[end + 1..];
    }
    !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
