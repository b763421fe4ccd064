//! Target platform and architecture types

use efetch_errors::FetchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target operating system, using the release store's identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Darwin,
    Linux,
    Win32,
    /// Mac App Store builds; published for the same versions as darwin but
    /// with no conventional default architecture
    Mas,
}

impl Platform {
    /// The architecture assumed when the caller supplies none.
    ///
    /// `Mas` has no default; the resolved architecture stays unset and
    /// artifact naming downstream reports the failure.
    #[must_use]
    pub fn default_arch(self) -> Option<Arch> {
        match self {
            Self::Darwin => Some(Arch::X64),
            Self::Win32 | Self::Linux => Some(Arch::Ia32),
            Self::Mas => None,
        }
    }

    /// Identifier used in release asset file names
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::Win32 => "win32",
            Self::Mas => "mas",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "darwin" => Ok(Self::Darwin),
            "linux" => Ok(Self::Linux),
            "win32" => Ok(Self::Win32),
            "mas" => Ok(Self::Mas),
            other => Err(FetchError::UnsupportedPlatform {
                value: other.to_string(),
            }),
        }
    }
}

/// Target CPU architecture, using the release store's identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Ia32,
    X64,
    Armv7l,
    Arm64,
}

impl Arch {
    /// Identifier used in release asset file names
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ia32 => "ia32",
            Self::X64 => "x64",
            Self::Armv7l => "armv7l",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ia32" => Ok(Self::Ia32),
            "x64" => Ok(Self::X64),
            // "arm" is the historical alias for the 32-bit ARM builds
            "arm" | "armv7l" => Ok(Self::Armv7l),
            "arm64" => Ok(Self::Arm64),
            other => Err(FetchError::UnsupportedArch {
                value: other.to_string(),
            }),
        }
    }
}
