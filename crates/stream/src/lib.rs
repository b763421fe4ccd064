#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Entry stream assembly for efetch
//!
//! This crate turns downloaded archives into streams of file entries and
//! provides the transforms the assembly step composes: glob filtering,
//! renaming, and merging two streams into one.

mod archive;
mod entry;
mod filter;

pub use archive::archive_entries;
pub use entry::FileEntry;
pub use filter::{compile, exclude, keep, rename_to};

use efetch_errors::Error;
use futures::stream::BoxStream;
use futures::StreamExt;

/// A stream of archive entries; errors arrive in-band as items
pub type EntryStream = BoxStream<'static, Result<FileEntry, Error>>;

/// A well-typed stream with no entries and no errors.
///
/// Stands in for an asset that was not requested, so merging needs no
/// special case for the absent side.
#[must_use]
pub fn empty() -> EntryStream {
    futures::stream::empty().boxed()
}

/// Merge two entry streams into one.
///
/// Entries interleave in whatever order the sources produce them; no
/// ordering is guaranteed between the two sides, only that every item
/// from both eventually appears. An error item on either source appears
/// on the merged stream the same way.
#[must_use]
pub fn merge(a: EntryStream, b: EntryStream) -> EntryStream {
    futures::stream::select(a, b).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn entries(names: &[&str]) -> EntryStream {
        let items: Vec<Result<FileEntry, Error>> = names
            .iter()
            .map(|n| Ok(FileEntry::new(*n, &b"x"[..])))
            .collect();
        stream::iter(items).boxed()
    }

    #[tokio::test]
    async fn test_merge_contains_everything() {
        let merged = merge(entries(&["a", "b"]), entries(&["c"]));
        let mut names: Vec<String> = merged
            .map(|item| item.unwrap().path.to_string_lossy().into_owned())
            .collect()
            .await;
        names.sort();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_merge_with_empty_side() {
        let merged = merge(entries(&["a"]), empty());
        let out: Vec<_> = merged.collect().await;
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_is_silent() {
        let out: Vec<_> = empty().collect().await;
        assert!(out.is_empty());
    }
}
