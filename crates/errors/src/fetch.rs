//! Request validation and orchestration error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("missing version")]
    MissingVersion,

    #[error("missing platform")]
    MissingPlatform,

    #[error("no architecture resolved for platform {platform}")]
    MissingArch { platform: String },

    #[error("unsupported platform: {value}")]
    UnsupportedPlatform { value: String },

    #[error("unsupported architecture: {value}")]
    UnsupportedArch { value: String },

    #[error("invalid repository coordinates: {input}")]
    InvalidRepo { input: String },
}
