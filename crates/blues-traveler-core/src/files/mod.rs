//! File persistence helpers.
//!
//! Writes go to a temp file in the destination directory which is synced and
//! then renamed over the target, so readers never observe a partial file.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// Permission bits applied to files written by [`atomic_write`] on unix.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Atomically replace `path` with `contents`.
///
/// Creates the parent directory if needed. On unix the file ends up with
/// `mode` permission bits.
pub fn atomic_write(path: &Path, contents: &[u8], mode: u32) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    set_mode(temp.path(), mode)?;

    temp.persist(path).map_err(|e| {
        tracing::warn!(
            event = "core.files.atomic_rename_failed",
            path = %path.display(),
            error = %e.error
        );
        e.error
    })?;

    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
