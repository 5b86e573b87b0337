//! Desktop integration: clipboard, entry dialog and notifications

pub mod backend;
pub mod clipboard;
pub mod gnome;

pub use backend::{ClipboardError, ClipboardSource, Desktop};
pub use clipboard::SystemClipboard;
pub use gnome::GnomeDesktop;
