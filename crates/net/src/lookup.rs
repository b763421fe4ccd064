//! Release lookup against a custom repository
//!
//! A custom repository publishes its archives as release assets; the real
//! download URL has to be discovered through the release API rather than
//! composed by convention.

use efetch_errors::{Error, LookupError};
use efetch_types::{RepoRef, ResolvedSpec};
use serde::Deserialize;

use crate::NetClient;

/// Outcome of a successful lookup: where to download, and what the asset
/// is actually called
#[derive(Debug, Clone)]
pub struct ResolvedAsset {
    pub download_url: String,
    pub file_name: String,
}

#[derive(Deserialize)]
struct Release {
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

#[derive(Deserialize)]
struct ReleaseAsset {
    name: String,
    browser_download_url: String,
}

/// Find the release asset matching the spec's canonical artifact file name.
///
/// The release is expected under the tag `v{version}`. The spec's `token`
/// is sent as bearer auth when present (private repositories, rate limits).
///
/// # Errors
///
/// Returns `LookupError::ReleaseNotFound` when the tag has no release,
/// `LookupError::AssetNotFound` when the release carries no matching asset,
/// and `LookupError::Api`/`InvalidResponse` on other API failures.
pub async fn lookup_release_asset(
    client: &NetClient,
    repo: &RepoRef,
    spec: &ResolvedSpec,
    api_base: &str,
) -> Result<ResolvedAsset, Error> {
    let tag = format!("v{}", spec.version);
    let url = format!(
        "{api_base}/repos/{}/{}/releases/tags/{tag}",
        repo.owner, repo.name
    );

    let response = client.get_with_auth(&url, spec.token.as_deref()).await?;

    let status = response.status();
    if status.as_u16() == 404 {
        return Err(LookupError::ReleaseNotFound {
            repo: repo.to_string(),
            tag,
        }
        .into());
    }
    if !status.is_success() {
        return Err(LookupError::Api {
            status: status.as_u16(),
            message: status.to_string(),
        }
        .into());
    }

    let release: Release = response
        .json()
        .await
        .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

    let wanted = spec.artifact_file_name()?;

    release
        .assets
        .into_iter()
        .find(|asset| asset.name == wanted)
        .map(|asset| ResolvedAsset {
            download_url: asset.browser_download_url,
            file_name: asset.name,
        })
        .ok_or_else(|| {
            LookupError::AssetNotFound {
                repo: repo.to_string(),
                tag,
                asset: wanted,
            }
            .into()
        })
}
