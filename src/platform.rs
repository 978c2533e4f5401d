//! Platform-specific helpers.
//! Hides OS differences behind a uniform API so the rest of the codebase can
//! remain platform-agnostic.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Whether this target's filesystems usually compare names case-insensitively.
#[inline]
pub fn case_insensitive_by_default() -> bool {
    cfg!(any(windows, target_os = "macos"))
}

/// Detect a rename that failed because source and destination are on different devices.
pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17, // ERROR_NOT_SAME_DEVICE
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

/// Flush directory entries (Unix). No-op on Windows.
#[cfg(unix)]
pub(crate) fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
pub(crate) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// Open log file for appending; new files are created 0600 on Unix.
/// Existing files keep their permissions.
#[cfg(unix)]
pub fn open_log_file_append(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600)
        .custom_flags(libc::O_NOFOLLOW)
        .open(path)
}

/// Open log file for appending (no symlink defense available via std on Windows).
#[cfg(not(unix))]
pub fn open_log_file_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}
