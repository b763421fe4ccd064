//! Entry stream transforms: glob filtering and renaming

use efetch_errors::{Error, StreamError};
use futures::future::ready;
use futures::StreamExt;
use glob::Pattern;
use std::path::PathBuf;

use crate::EntryStream;

/// Compile a glob into a filter pattern
///
/// # Errors
///
/// Returns `StreamError::InvalidPattern` when the glob does not parse.
pub fn compile(pattern: &str) -> Result<Pattern, Error> {
    Pattern::new(pattern).map_err(|e| {
        StreamError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Keep only entries whose path matches the pattern.
///
/// Errors always pass through; filtering applies to entries only.
#[must_use]
pub fn keep(stream: EntryStream, pattern: Pattern) -> EntryStream {
    stream
        .filter(move |item| {
            ready(match item {
                Ok(entry) => pattern.matches_path(&entry.path),
                Err(_) => true,
            })
        })
        .boxed()
}

/// Drop entries whose path matches the pattern.
///
/// Errors always pass through; filtering applies to entries only.
#[must_use]
pub fn exclude(stream: EntryStream, pattern: Pattern) -> EntryStream {
    stream
        .filter(move |item| {
            ready(match item {
                Ok(entry) => !pattern.matches_path(&entry.path),
                Err(_) => true,
            })
        })
        .boxed()
}

/// Rewrite every entry's path to a fixed destination
#[must_use]
pub fn rename_to(stream: EntryStream, new_path: impl Into<PathBuf>) -> EntryStream {
    let new_path = new_path.into();
    stream
        .map(move |item| {
            item.map(|mut entry| {
                entry.path = new_path.clone();
                entry
            })
        })
        .boxed()
}
