//! Release store URL conventions and checksum manifests

use efetch_errors::NetworkError;
use semver::Version;
use std::collections::HashMap;

/// Default release store serving the runtime archives
pub const DEFAULT_RELEASE_BASE: &str = "https://github.com/electron/electron/releases/download";

/// Default API host used for custom-repository release lookups
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Checksum manifest published next to each release's archives
pub const CHECKSUM_MANIFEST: &str = "SHASUMS256.txt";

/// Base URLs for release resolution, overridable for mirrors and tests
#[derive(Debug, Clone)]
pub struct Mirror {
    pub release_base: String,
    pub api_base: String,
}

impl Default for Mirror {
    fn default() -> Self {
        Self {
            release_base: DEFAULT_RELEASE_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Mirror {
    /// A mirror with a non-default release store base
    #[must_use]
    pub fn with_release_base(base: impl Into<String>) -> Self {
        Self {
            release_base: trim_trailing_slash(base.into()),
            ..Self::default()
        }
    }

    /// URL of a release archive under the default naming convention
    #[must_use]
    pub fn artifact_url(&self, version: &Version, file_name: &str) -> String {
        format!("{}/v{version}/{file_name}", self.release_base)
    }

    /// URL of the release's checksum manifest
    #[must_use]
    pub fn checksums_url(&self, version: &Version) -> String {
        format!("{}/v{version}/{CHECKSUM_MANIFEST}", self.release_base)
    }
}

fn trim_trailing_slash(mut s: String) -> String {
    while s.ends_with('/') {
        s.pop();
    }
    s
}

/// Parse a checksum manifest into file name -> lowercase hex digest.
///
/// Lines have the form `<hex>  <name>`; a leading `*` on the name marks
/// binary mode and is stripped. Blank lines are ignored.
///
/// # Errors
///
/// Returns `NetworkError::ChecksumManifest` on a line that does not split
/// into a digest and a file name.
pub fn parse_checksum_manifest(text: &str) -> Result<HashMap<String, String>, NetworkError> {
    let mut entries = HashMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (digest, name) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| NetworkError::ChecksumManifest(line.to_string()))?;

        let name = name.trim().trim_start_matches('*');
        if name.is_empty() || digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(NetworkError::ChecksumManifest(line.to_string()));
        }

        entries.insert(name.to_string(), digest.to_ascii_lowercase());
    }

    Ok(entries)
}

/// Look up the digest for one file in a parsed manifest
///
/// # Errors
///
/// Returns `NetworkError::ChecksumMissing` when the manifest has no entry
/// for the file.
pub fn checksum_for<'a>(
    entries: &'a HashMap<String, String>,
    file_name: &str,
) -> Result<&'a str, NetworkError> {
    entries
        .get(file_name)
        .map(String::as_str)
        .ok_or_else(|| NetworkError::ChecksumMissing {
            file: file_name.to_string(),
        })
}
