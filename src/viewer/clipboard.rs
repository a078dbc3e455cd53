//! Clipboard feedback controller
//!
//! Copies run as spawned tasks through a `ClipboardWriter`; the outcome comes
//! back as `ViewerEvent::CopyFinished`. A successful copy shows the
//! acknowledgment for `ack_window`, with at most one acknowledgment timer
//! live at any time.

use super::timers::Timeout;
use super::{Viewer, ViewerEvent};
use anyhow::{Context, Result};
use arboard::Clipboard;
use futures::future::BoxFuture;
use futures::FutureExt;

/// Fallible asynchronous clipboard write
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: String) -> BoxFuture<'static, Result<()>>;
}

/// The host clipboard via `arboard`
///
/// The clipboard is created fresh for every write to avoid holding resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: String) -> BoxFuture<'static, Result<()>> {
        async move {
            tokio::task::spawn_blocking(move || copy_to_clipboard(&text))
                .await
                .context("Clipboard task failed")?
        }
        .boxed()
    }
}

/// Copy text to the system clipboard
///
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

impl Viewer {
    /// Start an asynchronous copy of `text` on behalf of `code_id`
    pub fn copy(&mut self, text: impl Into<String>, code_id: impl Into<String>) {
        let code_id = code_id.into();
        self.copies.retain(|handle| !handle.is_finished());

        let write = self.clipboard.write_text(text.into());
        let tx = self.events_tx.clone();
        let handle = tokio::spawn(async move {
            let result = write.await;
            let _ = tx.send(ViewerEvent::CopyFinished { code_id, result });
        });
        self.copies.push(handle);
    }

    /// Copy a code block from the loaded content by id
    ///
    /// Returns false if no such code block exists.
    pub fn copy_code(&mut self, code_id: &str) -> bool {
        let Some(code) = self.content.code(code_id).map(str::to_string) else {
            tracing::debug!(code_id, "Copy requested for unknown code block");
            return false;
        };
        self.copy(code, code_id);
        true
    }

    pub(super) fn on_copy_finished(&mut self, code_id: String, result: Result<()>) {
        match result {
            Ok(()) => {
                // Replaces (and aborts) any acknowledgment still pending
                self.timers.schedule(
                    Timeout::ClearCopied {
                        code_id: code_id.clone(),
                    },
                    self.timing.ack_window,
                );
                tracing::debug!(code_id = %code_id, "Copied to clipboard");
                self.state.copied_code_id = Some(code_id);
            }
            Err(e) => {
                // TODO: product review - whether a failed copy should surface in the UI
                tracing::warn!(code_id = %code_id, "Clipboard write failed: {:#}", e);
            }
        }
    }

    pub(super) fn on_ack_expired(&mut self, code_id: String) {
        if self.state.copied_code_id.as_deref() == Some(code_id.as_str()) {
            self.state.copied_code_id = None;
        }
    }

    /// Copy tasks that have not yet reported back
    pub fn pending_copies(&self) -> usize {
        self.copies.iter().filter(|h| !h.is_finished()).count()
    }
}
