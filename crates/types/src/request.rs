//! Fetch request model and boundary validation

use crate::{asset, Arch, Platform};
use efetch_errors::FetchError;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coordinates of a custom release repository (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoRef {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(FetchError::InvalidRepo {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Caller-supplied fetch options, validated by [`FetchRequest::resolve`]
///
/// Every recognized field is enumerated here; there is no dynamic options
/// bag. `version` and `platform` are mandatory - their absence is a
/// request-validation failure, raised before any I/O.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchRequest {
    pub version: Option<Version>,
    pub platform: Option<Platform>,
    pub arch: Option<Arch>,
    /// Overrides the version-mapped main asset name when set
    pub asset_name: Option<String>,
    /// Credential passed through to the release store / lookup API
    pub token: Option<String>,
    /// Suppress progress rendering
    pub quiet: bool,
    /// Custom release repository; switches URL resolution to a lookup
    pub repo: Option<RepoRef>,
    /// Also fetch the Chromium-licensed codec asset and stream it separately
    pub ffmpeg_chromium: bool,
}

impl FetchRequest {
    /// Start a request for a concrete version and platform
    #[must_use]
    pub fn new(version: Version, platform: Platform) -> Self {
        Self {
            version: Some(version),
            platform: Some(platform),
            ..Self::default()
        }
    }

    /// Validate mandatory fields and resolve defaults.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::MissingVersion` or `FetchError::MissingPlatform`
    /// when the corresponding field is absent. No I/O happens here.
    pub fn resolve(&self) -> Result<ResolvedSpec, FetchError> {
        let version = self.version.clone().ok_or(FetchError::MissingVersion)?;
        let platform = self.platform.ok_or(FetchError::MissingPlatform)?;

        let arch = self.arch.or_else(|| platform.default_arch());

        let asset_name = self
            .asset_name
            .clone()
            .unwrap_or_else(|| asset::main_asset_name(&version).to_string());

        Ok(ResolvedSpec {
            version,
            platform,
            arch,
            asset_name,
            token: self.token.clone(),
            repo: self.repo.clone(),
        })
    }
}

/// A validated request with defaults applied
///
/// `arch` stays `None` for platforms without a conventional default; the
/// failure surfaces downstream when the artifact file name is composed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedSpec {
    pub version: Version,
    pub platform: Platform,
    pub arch: Option<Arch>,
    pub asset_name: String,
    pub token: Option<String>,
    pub repo: Option<RepoRef>,
}

impl ResolvedSpec {
    /// The same spec aimed at a different asset (used for the codec download)
    #[must_use]
    pub fn with_asset(&self, asset_name: impl Into<String>) -> Self {
        Self {
            asset_name: asset_name.into(),
            ..self.clone()
        }
    }

    /// File name of the archive this spec downloads by default convention
    ///
    /// # Errors
    ///
    /// Returns `FetchError::MissingArch` when no architecture was resolved.
    pub fn artifact_file_name(&self) -> Result<String, FetchError> {
        asset::artifact_file_name(&self.asset_name, &self.version, self.platform, self.arch)
    }
}
