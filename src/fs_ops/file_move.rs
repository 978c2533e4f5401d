//! File move primitive.
//! Attempts a rename; when source and destination sit on different devices,
//! falls back to a no-clobber copy followed by removal of the source.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::platform::{fsync_dir, is_cross_device};

use super::copy::copy_no_clobber;

/// Move a single file from `src` to `dst`.
///
/// The rename is as atomic as the platform makes it. The copy fallback is not:
/// if removing the source fails after a successful copy, the copy is deleted
/// again and the error returned, so the file stays where it was.
pub fn move_file(src: &Path, dst: &Path) -> io::Result<()> {
    let renamed = fs::rename(src, dst);
    finish_move(src, dst, renamed, |p| fs::remove_file(p))
}

/// Settle a move given the outcome of the rename attempt.
fn finish_move<R>(
    src: &Path,
    dst: &Path,
    renamed: io::Result<()>,
    remove_source: R,
) -> io::Result<()>
where
    R: FnOnce(&Path) -> io::Result<()>,
{
    match renamed {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dst.display(), "Renamed file");
            if let Some(parent) = dst.parent() {
                // Ignore fsync errors to avoid turning a successful rename into a failure.
                let _ = fsync_dir(parent);
            }
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            warn!(
                src = %src.display(),
                dest = %dst.display(),
                "Cross-device move; copying instead"
            );
            move_across_devices(src, dst, remove_source)
        }
        Err(e) => Err(e),
    }
}

/// Copy `src` to a fresh `dst`, then remove `src`. A source that cannot be
/// removed leaves no copy behind.
fn move_across_devices<R>(src: &Path, dst: &Path, remove_source: R) -> io::Result<()>
where
    R: FnOnce(&Path) -> io::Result<()>,
{
    let bytes = copy_no_clobber(src, dst)?;
    if let Err(e) = remove_source(src) {
        warn!(src = %src.display(), error = %e, "Source not removable; discarding copy");
        let _ = fs::remove_file(dst);
        return Err(e);
    }
    if let Some(parent) = dst.parent() {
        let _ = fsync_dir(parent);
    }
    debug!(src = %src.display(), dest = %dst.display(), bytes, "Copied file across devices");
    Ok(())
}
