//! Hotkey labels
//!
//! The shortcuts themselves are registered in the desktop's keyboard
//! settings; the saver only stores their names for `--info`.

use serde::{Deserialize, Serialize};

use crate::constants::defaults::hotkeys;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyLabels {
    /// Shortcut bound to a quick (template) save
    #[serde(default = "default_quick_save")]
    pub quick_save: String,

    /// Shortcut bound to a save with the filename dialog
    #[serde(default = "default_custom_save")]
    pub custom_save: String,
}

fn default_quick_save() -> String {
    hotkeys::QUICK_SAVE.to_string()
}

fn default_custom_save() -> String {
    hotkeys::CUSTOM_SAVE.to_string()
}

impl Default for HotkeyLabels {
    fn default() -> Self {
        Self {
            quick_save: default_quick_save(),
            custom_save: default_custom_save(),
        }
    }
}
