//! Atomic I/O operations with file locking

use crate::{Error, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Permission bits applied to written files on unix.
///
/// The auth file names users and networks, so it is not world-readable.
#[cfg(unix)]
pub const FILE_MODE: u32 = 0o640;

/// Write content atomically to a file with locking.
///
/// Content goes to a temp file in the same directory, which is locked,
/// synced and then renamed over the target. Readers see either the old
/// file or the new one, never a partial write.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::NoFileName {
            path: path.to_path_buf(),
        })?
        .to_string_lossy()
        .into_owned();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    let temp_file = options
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    if let Err(e) = replace_with(temp_file, &temp_path, path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file atomically");

    Ok(())
}

/// Lock, fill and sync the temp file, then rename it over `path`.
///
/// On error the temp file is left for the caller to remove.
fn replace_with(mut temp_file: File, temp_path: &Path, path: &Path, content: &[u8]) -> Result<()> {
    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all())
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;
    drop(temp_file);

    fs::rename(temp_path, path).map_err(|e| Error::io(path, e))
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
