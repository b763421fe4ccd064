//! Release lookup error types for custom repositories

use std::borrow::Cow;

use thiserror::Error;

use crate::UserFacingError;

#[derive(Debug, Clone, Error)]
pub enum LookupError {
    #[error("no release tagged {tag} in {repo}")]
    ReleaseNotFound { repo: String, tag: String },

    #[error("no asset named {asset} in release {tag} of {repo}")]
    AssetNotFound {
        repo: String,
        tag: String,
        asset: String,
    },

    #[error("release API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed release API response: {0}")]
    InvalidResponse(String),
}

impl UserFacingError for LookupError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ReleaseNotFound { .. } | Self::AssetNotFound { .. } => {
                Some("Check the repository publishes a release for this version.")
            }
            Self::Api { status: 403, .. } => {
                Some("You may be rate limited; supply an access token.")
            }
            _ => None,
        }
    }
}
