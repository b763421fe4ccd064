//! Version parsing error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum VersionError {
    #[error("invalid version: {message}")]
    ParseError { message: String },
}
