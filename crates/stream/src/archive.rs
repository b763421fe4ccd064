//! Zip archive to entry stream conversion

use bytes::Bytes;
use efetch_errors::{Error, StreamError};
use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use crate::{EntryStream, FileEntry};

/// How many decompressed entries may sit in flight before the reader blocks
const CHANNEL_CAPACITY: usize = 16;

/// Read a zip archive as a stream of file entries.
///
/// Decompression runs on a blocking task feeding a bounded channel, so a
/// slow consumer suspends the reader instead of buffering the archive in
/// memory. Directory members are skipped. A member whose name escapes the
/// archive root (path traversal) terminates the stream with an error.
///
/// Archive-level failures (unreadable file, corrupt central directory,
/// truncated member) surface as a single `Err` item, after which the
/// stream ends.
#[must_use]
pub fn archive_entries(path: PathBuf) -> EntryStream {
    let (tx, rx) = mpsc::channel::<Result<FileEntry, Error>>(CHANNEL_CAPACITY);

    tokio::task::spawn_blocking(move || {
        let mut tx = tx;
        if let Err(error) = read_entries(&path, &mut tx) {
            // Receiver may be gone; nothing to do about it
            let _ = futures::executor::block_on(tx.send(Err(error)));
        }
    });

    rx.boxed()
}

fn read_entries(
    path: &Path,
    tx: &mut mpsc::Sender<Result<FileEntry, Error>>,
) -> Result<(), Error> {
    let file = File::open(path).map_err(|e| Error::io_with_path(&e, path))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| StreamError::Archive(e.to_string()))?;

    for index in 0..archive.len() {
        let mut member = archive
            .by_index(index)
            .map_err(|e| StreamError::Archive(e.to_string()))?;

        if member.is_dir() {
            continue;
        }

        let entry_path = member.enclosed_name().ok_or_else(|| {
            StreamError::UnsafeEntryPath {
                path: member.name().to_string(),
            }
        })?;

        let mut data = Vec::with_capacity(usize::try_from(member.size()).unwrap_or(0));
        member
            .read_to_end(&mut data)
            .map_err(|e| StreamError::Archive(e.to_string()))?;

        let mut entry = FileEntry::new(entry_path, Bytes::from(data));
        if let Some(mode) = member.unix_mode() {
            entry = entry.with_mode(mode);
        }

        // Blocks when the consumer lags; ends early when it hung up
        if futures::executor::block_on(tx.send(Ok(entry))).is_err() {
            return Ok(());
        }
    }

    Ok(())
}
