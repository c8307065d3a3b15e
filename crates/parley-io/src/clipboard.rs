use std::sync::Arc;

use arboard::Clipboard;

pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

/// OS clipboard. A handle is opened per write so nothing platform-bound is held across threads.
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }
}

/// Write `text` on the blocking pool. Clipboard backends may block on the
/// display server, which must not stall the runtime.
pub async fn copy_text(clipboard: Arc<dyn ClipboardWriter>, text: String) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || clipboard.write_text(&text)).await?
}
