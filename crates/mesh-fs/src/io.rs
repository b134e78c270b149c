//! Atomic I/O operations with file locking

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result};

/// Suffix appended to a file name to form its staging file.
pub const TEMP_SUFFIX: &str = ".tmp";

/// The staging path used while replacing `path`: same directory, `.tmp` appended.
///
/// Living next to the target keeps the final rename on one filesystem.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Write content atomically to a file with locking.
///
/// The bytes go to [`temp_path`] first, are flushed to disk, and the staging
/// file is then renamed over `path`. Any failure before the rename returns an
/// error and leaves `path` exactly as it was. A staging file left behind by a
/// failed rename is harmless and is truncated by the next write.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp = temp_path(path);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp)
        .map_err(|e| Error::io(&temp, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed { path: temp.clone() })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp, e))?;

    temp_file.sync_all().map_err(|e| Error::io(&temp, e))?;

    temp_file
        .unlock()
        .map_err(|_| Error::LockFailed { path: temp.clone() })?;
    drop(temp_file);

    fs::rename(&temp, path).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "replaced file contents");

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
