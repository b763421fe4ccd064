//! Command line interface definition

use clap::Parser;
use efetch_errors::{Error, Result};
use efetch_types::FetchRequest;
use std::path::PathBuf;

/// efetch - fetch prebuilt Electron release archives for packaging
#[derive(Parser)]
#[command(name = "efetch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch prebuilt Electron release archives for packaging")]
#[command(long_about = None)]
pub struct Cli {
    /// Release version to fetch (e.g. 10.0.0)
    pub runtime_version: Option<String>,

    /// Target operating system: darwin, linux, win32, or mas
    #[arg(long)]
    pub platform: Option<String>,

    /// Target CPU architecture: ia32, x64, armv7l, or arm64 ("arm" is
    /// accepted as an alias for armv7l)
    #[arg(long)]
    pub arch: Option<String>,

    /// Override the main asset name, skipping the version-based mapping
    #[arg(long, value_name = "NAME")]
    pub asset_name: Option<String>,

    /// Access token for the release store and lookup API
    #[arg(long, env = "EFETCH_GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Suppress progress output
    #[arg(long, short)]
    pub quiet: bool,

    /// Fetch from a custom release repository (owner/name)
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Also fetch the Chromium-licensed ffmpeg build, streamed separately
    /// from the runtime archive
    #[arg(long)]
    pub ffmpeg_chromium: bool,

    /// Directory the fetched entries are written into
    #[arg(long, short, value_name = "DIR", default_value = "out")]
    pub output: PathBuf,

    /// Alternate release store base URL
    #[arg(long, env = "EFETCH_MIRROR", value_name = "URL")]
    pub mirror: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Build the library request from the parsed arguments.
    ///
    /// Presence of version and platform is left to the fetch layer; this
    /// only parses the values that were supplied.
    pub fn to_request(&self) -> Result<FetchRequest> {
        Ok(FetchRequest {
            version: self
                .runtime_version
                .as_deref()
                .map(efetch_types::Version::parse)
                .transpose()?,
            platform: self
                .platform
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(Error::from)?,
            arch: self
                .arch
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(Error::from)?,
            asset_name: self.asset_name.clone(),
            token: self.token.clone(),
            quiet: self.quiet,
            repo: self
                .repo
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(Error::from)?,
            ffmpeg_chromium: self.ffmpeg_chromium,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use efetch_types::{Arch, Platform};

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_full_invocation_maps_to_request() {
        let cli = Cli::try_parse_from([
            "efetch",
            "10.0.0",
            "--platform",
            "darwin",
            "--ffmpeg-chromium",
            "--output",
            "/tmp/out",
        ])
        .unwrap();

        let request = cli.to_request().unwrap();
        assert_eq!(request.version, Some(efetch_types::Version::new(10, 0, 0)));
        assert_eq!(request.platform, Some(Platform::Darwin));
        assert!(request.ffmpeg_chromium);
        assert_eq!(cli.output, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_arm_alias_on_the_command_line() {
        let cli = Cli::try_parse_from(["efetch", "1.0.0", "--platform", "linux", "--arch", "arm"])
            .unwrap();
        assert_eq!(cli.to_request().unwrap().arch, Some(Arch::Armv7l));
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let cli = Cli::try_parse_from(["efetch"]).unwrap();
        let request = cli.to_request().unwrap();
        assert!(request.version.is_none());
        assert!(request.platform.is_none());
    }

    #[test]
    fn test_bad_version_is_rejected() {
        let cli = Cli::try_parse_from(["efetch", "not-a-version"]).unwrap();
        assert!(cli.to_request().is_err());
    }

    #[test]
    fn test_bad_repo_is_rejected() {
        let cli =
            Cli::try_parse_from(["efetch", "1.0.0", "--repo", "not-coordinates"]).unwrap();
        assert!(cli.to_request().is_err());
    }
}
