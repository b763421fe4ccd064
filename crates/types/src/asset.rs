//! Release asset naming rules

use crate::{Arch, Platform};
use efetch_errors::FetchError;
use semver::Version;

/// Main runtime asset name for releases from 0.24.0 on
pub const MODERN_ASSET: &str = "electron";

/// Main runtime asset name for releases before 0.24.0
pub const LEGACY_ASSET: &str = "atom-shell";

/// Codec asset name, fixed across all versions
pub const CODEC_ASSET: &str = "ffmpeg";

/// Glob matching the codec binary inside any archive
pub const CODEC_FILE_GLOB: &str = "**/*ffmpeg.*";

/// Where the codec library lives inside the darwin application bundle
pub const DARWIN_FFMPEG_PATH: &str = "Electron.app/Contents/Frameworks/\
                                      Electron Framework.framework/Versions/A/\
                                      Libraries/libffmpeg.dylib";

/// Canonical main asset name for a release version.
///
/// The runtime was renamed in 0.24.0; earlier releases publish their
/// archives under the old name.
#[must_use]
pub fn main_asset_name(version: &Version) -> &'static str {
    const RENAME: Version = Version::new(0, 24, 0);
    if *version >= RENAME {
        MODERN_ASSET
    } else {
        LEGACY_ASSET
    }
}

/// File name of a release archive: `{asset}-v{version}-{platform}-{arch}.zip`
///
/// # Errors
///
/// Returns `FetchError::MissingArch` when no architecture was resolved for
/// the platform, since the file name cannot be composed without one.
pub fn artifact_file_name(
    asset: &str,
    version: &Version,
    platform: Platform,
    arch: Option<Arch>,
) -> Result<String, FetchError> {
    let arch = arch.ok_or_else(|| FetchError::MissingArch {
        platform: platform.to_string(),
    })?;
    Ok(format!("{asset}-v{version}-{platform}-{arch}.zip"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_boundary() {
        assert_eq!(main_asset_name(&Version::new(0, 24, 0)), MODERN_ASSET);
        assert_eq!(main_asset_name(&Version::new(0, 23, 9)), LEGACY_ASSET);
        assert_eq!(main_asset_name(&Version::new(10, 0, 0)), MODERN_ASSET);
    }

    #[test]
    fn test_artifact_file_name() {
        let name = artifact_file_name(
            MODERN_ASSET,
            &Version::new(10, 0, 0),
            Platform::Darwin,
            Some(Arch::X64),
        )
        .unwrap();
        assert_eq!(name, "electron-v10.0.0-darwin-x64.zip");
    }

    #[test]
    fn test_artifact_file_name_requires_arch() {
        let err = artifact_file_name(
            MODERN_ASSET,
            &Version::new(10, 0, 0),
            Platform::Mas,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::MissingArch { .. }));
    }

    #[test]
    fn test_darwin_ffmpeg_path_shape() {
        assert!(DARWIN_FFMPEG_PATH.starts_with("Electron.app/"));
        assert!(DARWIN_FFMPEG_PATH.ends_with("libffmpeg.dylib"));
    }
}
