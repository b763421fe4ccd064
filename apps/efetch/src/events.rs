//! Event handling and progress display

use efetch_events::{AppEvent, DownloadEvent, GeneralEvent};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::HashMap;

/// Bar length assumed until the server reports a content length
const UNKNOWN_TOTAL: u64 = 100;

/// Event handler for progress display and user feedback
pub struct EventHandler {
    /// Multi-progress manager for concurrent progress bars
    multi_progress: MultiProgress,
    /// Active progress bars by asset name
    download_bars: HashMap<String, ProgressBar>,
}

impl EventHandler {
    /// Create new event handler; `quiet` suppresses all rendering
    pub fn new(quiet: bool) -> Self {
        let multi_progress = MultiProgress::new();
        if quiet {
            multi_progress.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self {
            multi_progress,
            download_bars: HashMap::new(),
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        crate::logging::log_event(&event);

        match event {
            AppEvent::Download(DownloadEvent::Started {
                asset, total_bytes, ..
            }) => {
                self.handle_download_started(asset, total_bytes);
            }
            AppEvent::Download(DownloadEvent::Progress {
                asset,
                bytes_downloaded,
                total_bytes,
            }) => {
                self.handle_download_progress(&asset, bytes_downloaded, total_bytes);
            }
            AppEvent::Download(DownloadEvent::Completed { asset, .. }) => {
                if let Some(bar) = self.download_bars.remove(&asset) {
                    bar.finish_with_message(format!("Downloaded {asset}"));
                }
            }
            AppEvent::Download(DownloadEvent::Failed { asset, error }) => {
                if let Some(bar) = self.download_bars.remove(&asset) {
                    bar.abandon_with_message(format!("Failed {asset}: {error}"));
                }
            }
            AppEvent::General(GeneralEvent::Warning { message, .. }) => {
                let _ = self.multi_progress.println(format!("warning: {message}"));
            }
            AppEvent::General(GeneralEvent::Error { message, .. }) => {
                let _ = self.multi_progress.println(format!("error: {message}"));
            }
            AppEvent::General(_) => {}
        }
    }

    fn handle_download_started(&mut self, asset: String, total_bytes: Option<u64>) {
        let bar = self
            .multi_progress
            .add(ProgressBar::new(total_bytes.unwrap_or(UNKNOWN_TOTAL)));
        bar.set_style(
            ProgressStyle::with_template("Downloading {msg}: [{bar:30}] {percent}% ETA: {eta}")
                .expect("progress template is valid")
                .progress_chars("=> "),
        );
        bar.set_message(asset.clone());
        bar.set_position(0);
        self.download_bars.insert(asset, bar);
    }

    fn handle_download_progress(
        &mut self,
        asset: &str,
        bytes_downloaded: u64,
        total_bytes: Option<u64>,
    ) {
        if let Some(bar) = self.download_bars.get(asset) {
            if let Some(total) = total_bytes {
                bar.set_length(total);
            }
            bar.set_position(bytes_downloaded);
        }
    }

    /// Drop all remaining bars without leaving partial output behind
    pub fn clear(&mut self) {
        for (_, bar) in self.download_bars.drain() {
            bar.finish_and_clear();
        }
    }
}
