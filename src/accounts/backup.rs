//! Backup directory preparation.

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tracing::debug;

/// Create the backup directory if needed and apply `mode` to it.
///
/// The mode is re-applied when the directory already exists.
pub fn ensure_backup_dir(path: &Path, mode: u32) -> io::Result<()> {
    if !path.is_dir() {
        debug!(path = %path.display(), "Creating backup directory");
        fs::create_dir_all(path)?;
    }
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

/// Whether `path` is a directory, following symlinks.
pub fn home_dir_exists(path: &Path) -> bool {
    path.is_dir()
}
