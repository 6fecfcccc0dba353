//! System clipboard access via arboard.

use linkspan_core::ClipboardText;

/// The system clipboard. Degrades to "empty" when unavailable
/// (e.g. no display server).
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                log::warn!("Clipboard unavailable: {}", e);
                None
            }
        };
        Self { inner }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardText for SystemClipboard {
    fn current_text(&mut self) -> Option<String> {
        let clipboard = self.inner.as_mut()?;
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                log::debug!("No text on clipboard: {}", e);
                None
            }
        }
    }
}
