//! Writing fetched entries to the output directory

use efetch_errors::{Error, Result};
use efetch_stream::FileEntry;
use std::path::Path;

/// Write one entry under `output`, creating parent directories as needed
/// and applying recorded permission bits.
pub async fn write_entry(output: &Path, entry: &FileEntry) -> Result<()> {
    let dest = output.join(&entry.path);

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io_with_path(&e, parent))?;
    }

    tokio::fs::write(&dest, &entry.data)
        .await
        .map_err(|e| Error::io_with_path(&e, &dest))?;

    #[cfg(unix)]
    if let Some(mode) = entry.unix_mode {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(&dest, std::fs::Permissions::from_mode(mode))
            .await
            .map_err(|e| Error::io_with_path(&e, &dest))?;
    }

    Ok(())
}
