//! System clipboard access via arboard

use arboard::Clipboard;
use tracing::debug;

use crate::desktop::backend::{ClipboardError, ClipboardSource};

/// Reads the system clipboard (X11 or Wayland, whichever arboard finds)
pub struct SystemClipboard;

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        match clipboard.get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => {
                debug!("Clipboard holds no text content");
                Ok(String::new())
            }
            Err(e) => Err(ClipboardError::Read(e.to_string())),
        }
    }
}
