//! Archive member representation

use bytes::Bytes;
use std::path::PathBuf;

/// One file pulled out of a release archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path inside the archive (always relative, no traversal components)
    pub path: PathBuf,
    /// File contents
    pub data: Bytes,
    /// Unix permission bits, when the archive recorded them
    pub unix_mode: Option<u32>,
}

impl FileEntry {
    /// Create an entry from a path and contents
    pub fn new(path: impl Into<PathBuf>, data: impl Into<Bytes>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
            unix_mode: None,
        }
    }

    /// Same entry with permission bits attached
    #[must_use]
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.unix_mode = Some(mode);
        self
    }
}
