//! I/O helper utilities.
//!
//! Enrich io::Error with actionable, platform-aware hints.
//!
//! Usage:
//!   fs.create_dir_all(dir).map_err(io_error_with_help("create destination directory", dir))?;

use std::io;
use std::path::Path;

use crate::errors::RelocateError;

/// Short operator hint for common io failures, if one applies.
pub fn io_error_hint(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => {
                Some("permission denied; check ownership and write permissions")
            }
            libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
            libc::EBUSY | libc::ETXTBSY => {
                Some("resource busy; ensure no other process holds the file")
            }
            libc::ENOENT => Some("path not found; it may have been removed during the run"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem; cannot write here"),
            libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
            libc::ENAMETOOLONG => Some("filename or path too long; shorten path segments"),
            libc::EMFILE | libc::ENFILE => {
                Some("open file limit reached; close files or raise limits")
            }
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }

    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            5 => Some("access denied; check permissions"),
            17 => Some("not same device; cross-filesystem move"),
            32 | 33 => Some("sharing violation; file is in use by another process"),
            2 | 3 => Some("path not found; it may have been removed during the run"),
            112 => Some("insufficient disk space"),
            19 => Some("write protected / read-only media"),
            206 => Some("filename or path too long"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => {
            Some("permission denied; check ownership and write permissions")
        }
        io::ErrorKind::NotFound => Some("path not found; it may have been removed during the run"),
        io::ErrorKind::AlreadyExists => Some("already exists; another writer claimed the name"),
        _ => None,
    }
}

/// Adapter for `.map_err(...)`: turns an io::Error into [`RelocateError::Io`]
/// whose context names the operation, the path and a hint when one applies.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> RelocateError + 'a {
    move |e: io::Error| {
        let mut context = format!("{} '{}'", op, path.display());
        if let Some(hint) = io_error_hint(&e) {
            context.push_str(&format!(" ({hint})"));
        }
        RelocateError::io(context, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_gets_kind_hint() {
        let e = io::Error::from(io::ErrorKind::NotFound);
        assert!(io_error_hint(&e).unwrap().contains("not found"));
    }

    #[test]
    fn unknown_kinds_have_no_hint() {
        let e = io::Error::other("boom");
        assert!(io_error_hint(&e).is_none());
    }

    #[test]
    fn wrapped_error_names_op_and_path() {
        let p = Path::new("/srv/out");
        let err = io_error_with_help("create destination directory", p)(io::Error::from(
            io::ErrorKind::PermissionDenied,
        ));
        let msg = err.to_string();
        assert!(msg.contains("create destination directory '/srv/out'"));
        assert!(msg.contains("permission denied"));
        assert_eq!(err.kind(), "io_failure");
    }
}
