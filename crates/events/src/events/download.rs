use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Download lifecycle events
///
/// Each event carries the asset name it belongs to; a renderer keys its
/// progress display off that name, one bar per in-flight asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DownloadEvent {
    /// Download started, total size known when the server sent a length
    Started {
        asset: String,
        url: String,
        total_bytes: Option<u64>,
    },

    /// Bytes written so far; emitted once per received chunk
    Progress {
        asset: String,
        bytes_downloaded: u64,
        total_bytes: Option<u64>,
    },

    /// Download finished and the archive landed at `path`
    Completed {
        asset: String,
        bytes_downloaded: u64,
        path: PathBuf,
    },

    /// Download failed; `error` is the stringified cause, unmodified
    Failed { asset: String, error: String },
}

impl DownloadEvent {
    /// Fraction complete in `[0, 1]`, if the total is known.
    ///
    /// Monotonic non-decreasing by convention for a given asset; not
    /// independently enforced.
    #[must_use]
    pub fn fraction(&self) -> Option<f64> {
        match self {
            Self::Progress {
                bytes_downloaded,
                total_bytes: Some(total),
                ..
            } if *total > 0 => {
                #[allow(clippy::cast_precision_loss)]
                let fraction = *bytes_downloaded as f64 / *total as f64;
                Some(fraction.min(1.0))
            }
            Self::Completed { .. } => Some(1.0),
            _ => None,
        }
    }

    /// The asset name this event reports under
    #[must_use]
    pub fn asset(&self) -> &str {
        match self {
            Self::Started { asset, .. }
            | Self::Progress { asset, .. }
            | Self::Completed { asset, .. }
            | Self::Failed { asset, .. } => asset,
        }
    }
}
