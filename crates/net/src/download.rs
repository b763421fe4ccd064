//! File download with progress reporting and verification

use efetch_errors::{Error, NetworkError};
use efetch_events::{EventEmitter, EventSender};
use futures::StreamExt;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::NetClient;

/// Download operation handle
///
/// Owns the progress identity (the asset name) it reports under; progress
/// reaches the caller only through the event channel passed to `execute`.
pub struct Download {
    url: Url,
    asset: String,
}

impl Download {
    /// Create a new download reporting under `asset`
    ///
    /// # Errors
    ///
    /// Returns an error if the provided URL is invalid or cannot be parsed.
    pub fn new(url: &str, asset: impl Into<String>) -> Result<Self, Error> {
        let url = Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            url,
            asset: asset.into(),
        })
    }

    /// Execute the download, streaming the body to `dest`.
    ///
    /// The body lands in a temporary sibling file first and is renamed into
    /// place only after the optional SHA-256 verification passes.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the server returns an
    /// error status, the file cannot be written, or the digest does not
    /// match `expected_sha256`.
    pub async fn execute(
        self,
        client: &NetClient,
        dest: &Path,
        expected_sha256: Option<&str>,
        tx: &EventSender,
    ) -> Result<PathBuf, Error> {
        let url_str = self.url.to_string();

        let response = client.get(url_str.as_str()).await?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                message: response.status().to_string(),
            }
            .into());
        }

        let content_length = response.content_length();

        tx.emit_download_started(&self.asset, &url_str, content_length);

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Stream into a temporary file, verifying as we go
        let temp_path = dest.with_extension("download");
        let mut file = File::create(&temp_path).await?;

        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;
        let mut hasher = Sha256::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| NetworkError::DownloadFailed(e.to_string()))?;

            hasher.update(&chunk);
            file.write_all(&chunk).await?;

            downloaded += chunk.len() as u64;
            tx.emit_download_progress(&self.asset, downloaded, content_length);
        }

        file.flush().await?;
        drop(file);

        let actual = format!("{:x}", hasher.finalize());

        if let Some(expected) = expected_sha256 {
            if !actual.eq_ignore_ascii_case(expected) {
                let _ = tokio::fs::remove_file(&temp_path).await;

                return Err(NetworkError::ChecksumMismatch {
                    file: dest
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    expected: expected.to_ascii_lowercase(),
                    actual,
                }
                .into());
            }
        }

        tokio::fs::rename(&temp_path, dest).await?;

        tx.emit_download_completed(&self.asset, downloaded, dest.to_path_buf());

        Ok(dest.to_path_buf())
    }
}
