//! Archive and entry stream error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StreamError {
    #[error("archive error: {0}")]
    Archive(String),

    #[error("archive contains unsafe entry path: {path}")]
    UnsafeEntryPath { path: String },

    #[error("invalid filter pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },
}
