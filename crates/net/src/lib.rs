#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for efetch
//!
//! This crate handles all HTTP operations: archive downloads with progress
//! events and checksum verification, checksum manifest fetching, and release
//! lookups against custom repositories.

mod client;
mod download;
mod lookup;
mod mirror;

pub use client::{NetClient, NetConfig};
pub use download::Download;
pub use lookup::{lookup_release_asset, ResolvedAsset};
pub use mirror::{
    checksum_for, parse_checksum_manifest, Mirror, CHECKSUM_MANIFEST, DEFAULT_API_BASE,
    DEFAULT_RELEASE_BASE,
};

use efetch_errors::{Error, NetworkError};
use efetch_events::{EventEmitter, EventSender};
use efetch_types::ResolvedSpec;
use std::path::{Path, PathBuf};

/// Fetch text content from a URL
///
/// # Errors
///
/// Returns an error if the HTTP request fails, the server returns an error
/// status, or the response body cannot be decoded as text.
pub async fn fetch_text(client: &NetClient, url: &str) -> Result<String, Error> {
    let response = client.get(url).await?;

    if !response.status().is_success() {
        return Err(NetworkError::HttpError {
            status: response.status().as_u16(),
            message: response.status().to_string(),
        }
        .into());
    }

    response
        .text()
        .await
        .map_err(|e| NetworkError::DownloadFailed(e.to_string()).into())
}

/// Download one release asset described by `spec` into `dest_dir`.
///
/// Resolution branches on the spec's repository field:
///
/// - with a custom repository, the real URL and asset file name come from a
///   release lookup; a lookup failure surfaces before any download attempt,
///   and checksum verification is disabled (no manifest is published there);
/// - otherwise the URL is composed by the release store convention and the
///   archive is verified against the release's `SHASUMS256.txt`.
///
/// Progress is reported through `tx` under the spec's asset name; any
/// failure is also emitted as a `Failed` event before the error returns.
///
/// # Errors
///
/// Propagates lookup, transport, I/O, and checksum errors unmodified.
pub async fn download_asset(
    client: &NetClient,
    spec: &ResolvedSpec,
    mirror: &Mirror,
    dest_dir: &Path,
    tx: &EventSender,
) -> Result<PathBuf, Error> {
    match download_asset_inner(client, spec, mirror, dest_dir, tx).await {
        Ok(path) => Ok(path),
        Err(error) => {
            tx.emit_download_failed(&spec.asset_name, error.to_string());
            Err(error)
        }
    }
}

async fn download_asset_inner(
    client: &NetClient,
    spec: &ResolvedSpec,
    mirror: &Mirror,
    dest_dir: &Path,
    tx: &EventSender,
) -> Result<PathBuf, Error> {
    if let Some(repo) = &spec.repo {
        let resolved = lookup_release_asset(client, repo, spec, &mirror.api_base).await?;

        tx.emit_debug(format!(
            "resolved {} from {repo} to {}",
            spec.asset_name, resolved.download_url
        ));

        // The custom repo serves no checksum manifest; trust its assets
        return Download::new(&resolved.download_url, &spec.asset_name)?
            .execute(client, &dest_dir.join(&resolved.file_name), None, tx)
            .await;
    }

    let file_name = spec.artifact_file_name()?;
    let url = mirror.artifact_url(&spec.version, &file_name);

    let manifest_url = mirror.checksums_url(&spec.version);
    tx.emit_debug(format!("fetching checksum manifest from {manifest_url}"));

    let manifest = fetch_text(client, &manifest_url).await?;
    let entries = parse_checksum_manifest(&manifest)?;
    let expected = checksum_for(&entries, &file_name)?;

    Download::new(&url, &spec.asset_name)?
        .execute(client, &dest_dir.join(&file_name), Some(expected), tx)
        .await
}
