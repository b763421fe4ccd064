//! Tracing integration for events
//!
//! Converts domain events into structured log records so observability
//! stays consistent whether or not progress bars are rendered.

use efetch_events::{AppEvent, DownloadEvent, GeneralEvent};
use tracing::{debug, error, info, warn};

/// Log an event at its appropriate level with structured fields
pub fn log_event(event: &AppEvent) {
    match event {
        AppEvent::Download(DownloadEvent::Started {
            asset,
            url,
            total_bytes,
        }) => {
            info!(asset = %asset, url = %url, total_bytes = ?total_bytes, "download started");
        }
        AppEvent::Download(DownloadEvent::Progress {
            asset,
            bytes_downloaded,
            ..
        }) => {
            debug!(asset = %asset, bytes_downloaded, "download progress");
        }
        AppEvent::Download(DownloadEvent::Completed {
            asset,
            bytes_downloaded,
            path,
        }) => {
            info!(
                asset = %asset,
                bytes_downloaded,
                path = %path.display(),
                "download completed"
            );
        }
        AppEvent::Download(DownloadEvent::Failed { asset, error }) => {
            error!(asset = %asset, error = %error, "download failed");
        }
        AppEvent::General(GeneralEvent::Warning { message, .. }) => warn!("{message}"),
        AppEvent::General(GeneralEvent::Error { message, .. }) => error!("{message}"),
        AppEvent::General(GeneralEvent::DebugLog { message, .. }) => debug!("{message}"),
        AppEvent::General(
            GeneralEvent::OperationStarted { operation }
            | GeneralEvent::OperationCompleted { operation, .. },
        ) => debug!(operation = %operation, "operation"),
        AppEvent::General(GeneralEvent::OperationFailed { operation, error }) => {
            error!(operation = %operation, error = %error, "operation failed");
        }
    }
}
