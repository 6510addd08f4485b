use anyhow::anyhow;
use anyhow::Result;
use once_cell::sync::OnceCell;
use tokio::sync::mpsc;

static SENDER: OnceCell<mpsc::UnboundedSender<String>> = OnceCell::new();

/// Owns the system clipboard on a dedicated task. Some platforms drop clipboard
/// contents when the handle that set them goes away, so a single handle is kept
/// alive for the whole session.
pub struct ClipboardService {}

impl ClipboardService {
    pub async fn start() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        SENDER
            .set(tx)
            .map_err(|_| return anyhow!("Clipboard service was already started."))?;

        let mut clipboard = arboard::Clipboard::new()?;
        while let Some(text) = rx.recv().await {
            if let Err(err) = clipboard.set_text(text) {
                tracing::warn!(error = %err, "failed to write to clipboard");
            }
        }

        return Ok(());
    }

    /// Whether a clipboard can be opened on this machine at all.
    pub fn is_supported() -> bool {
        return arboard::Clipboard::new().is_ok();
    }

    pub fn set(text: String) -> Result<()> {
        if let Some(tx) = SENDER.get() {
            tx.send(text)?;
            return Ok(());
        }

        return Err(anyhow!("Clipboard is not available in this terminal session."));
    }
}
