#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in efetch
//!
//! All user-visible output flows through events - no direct logging or
//! printing is allowed outside the CLI. Each download operation owns its
//! own progress identity (the asset name it reports under); there is no
//! shared progress state between operations.

pub mod events;
pub use events::{AppEvent, DownloadEvent, GeneralEvent};

use tokio::sync::mpsc::UnboundedSender;

/// Type alias for event sender
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for event receiver
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout the efetch system
///
/// This trait provides a single, consistent API for emitting events regardless
/// of whether you have a raw `EventSender` or a struct that contains one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message)));
    }

    /// Emit a download started event
    fn emit_download_started(
        &self,
        asset: impl Into<String>,
        url: impl Into<String>,
        total_bytes: Option<u64>,
    ) {
        self.emit(AppEvent::Download(DownloadEvent::Started {
            asset: asset.into(),
            url: url.into(),
            total_bytes,
        }));
    }

    /// Emit a download progress event
    fn emit_download_progress(
        &self,
        asset: impl Into<String>,
        bytes_downloaded: u64,
        total_bytes: Option<u64>,
    ) {
        self.emit(AppEvent::Download(DownloadEvent::Progress {
            asset: asset.into(),
            bytes_downloaded,
            total_bytes,
        }));
    }

    /// Emit a download completed event
    fn emit_download_completed(
        &self,
        asset: impl Into<String>,
        bytes_downloaded: u64,
        path: std::path::PathBuf,
    ) {
        self.emit(AppEvent::Download(DownloadEvent::Completed {
            asset: asset.into(),
            bytes_downloaded,
            path,
        }));
    }

    /// Emit a download failed event
    fn emit_download_failed(&self, asset: impl Into<String>, error: impl Into<String>) {
        self.emit(AppEvent::Download(DownloadEvent::Failed {
            asset: asset.into(),
            error: error.into(),
        }));
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
/// This allows `EventSender` to be used directly where `EventEmitter` is expected
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_delivers_events() {
        let (tx, mut rx) = channel();
        tx.emit_download_started("electron", "https://example.com/a.zip", Some(100));

        match rx.try_recv() {
            Ok(AppEvent::Download(DownloadEvent::Started { asset, .. })) => {
                assert_eq!(asset, "electron");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_emit_after_receiver_dropped_is_silent() {
        let (tx, rx) = channel();
        drop(rx);
        // Must not panic or error
        tx.emit_download_failed("ffmpeg", "boom");
    }
}
