//! Application-wide constants
//!
//! Paths, default configuration values and user-facing strings shared by the
//! saver, the reporter and the entry point.

/// Configuration paths and filenames
pub mod config {
    /// Application directory name under XDG config
    pub const APP_DIR: &str = "clipboard-saver";

    /// Configuration filename
    pub const FILENAME: &str = "config.json";

    /// Key written by `--init-config` to document the template variables
    pub const COMMENT_KEY: &str = "_comment";

    pub const COMMENT_TEXT: &str = "Available template variables: {date}, {time}, {datetime}, {timestamp}, {text}, {text_full}";
}

/// Log file location under the XDG data dir
pub mod logging {
    /// Application directory name under XDG data
    pub const APP_DIR: &str = "clipboard-saver";

    pub const FILENAME: &str = "clipboard_saver.log";
}

/// Default configuration values
/// These are used when the config file is missing or omits a key
pub mod defaults {
    /// Save directory (`~` is expanded at runtime)
    pub const SAVE_DIR: &str = "~/Documents/clipboard_saves";

    /// File name template
    pub const FILE_TEMPLATE: &str = "clip_{date}_{time}_{text:.15}.txt";

    /// Maximum number of characters kept from the clipboard text
    pub const MAX_FILENAME_LENGTH: usize = 50;

    /// Desktop notifications enabled
    pub const NOTIFICATIONS: bool = true;

    pub const LOG_LEVEL: &str = "INFO";

    /// Hotkey labels shown by `--info` (the desktop owns the real bindings)
    pub mod hotkeys {
        pub const QUICK_SAVE: &str = "Ctrl+Alt+S";
        pub const CUSTOM_SAVE: &str = "Ctrl+Alt+F";
    }
}

/// Saved file naming
pub mod files {
    /// Extension of every file the saver manages
    pub const EXTENSION: &str = "txt";

    /// Replacement for clipboard text that sanitizes to nothing
    pub const EMPTY_TEXT: &str = "empty";

    /// Prefix of the fallback name used when a template cannot be rendered
    pub const FALLBACK_PREFIX: &str = "clip_";

    /// Highest collision suffix tried before giving up
    pub const MAX_COLLISION_SUFFIX: u32 = 9999;
}

/// External desktop helpers
pub mod desktop {
    /// Entry dialog binary
    pub const DIALOG_BIN: &str = "zenity";
    pub const DIALOG_TITLE: &str = "Save Clipboard As";
    pub const DIALOG_TEXT: &str = "Enter filename:";
    pub const DIALOG_WIDTH: u32 = 400;

    /// Notification binary
    pub const NOTIFY_BIN: &str = "notify-send";

    /// Expiry for informational notifications
    pub const NOTIFY_SHORT_MS: u64 = 3000;

    /// Expiry for error notifications
    pub const NOTIFY_LONG_MS: u64 = 5000;

    /// Longest file name shown in a notification before it is shortened
    pub const NOTIFY_NAME_MAX: usize = 40;

    /// Number of error message characters included in a notification
    pub const NOTIFY_ERROR_CHARS: usize = 50;
}
