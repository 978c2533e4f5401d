//! Filesystem provider seam.
//!
//! The relocation engine only talks to the filesystem through [`FileSystem`],
//! which keeps the engine testable with fakes (e.g. a file that refuses to move).
//! [`StdFileSystem`] is the real implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Filesystem primitives needed by a relocation run.
pub trait FileSystem {
    /// True if `path` exists and is a directory (symlinks followed).
    fn is_dir(&self, path: &Path) -> bool;

    /// True if anything occupies `path`, including a dangling symlink.
    fn entry_exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Resolve an existing path to its absolute form with symlinks resolved.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Every regular file below `root`, recursively, in a stable order.
    /// The `exclude` subtree is skipped entirely.
    fn list_files(&self, root: &Path, exclude: Option<&Path>) -> io::Result<Vec<PathBuf>>;

    /// Move `src` to `dst`. Callers guarantee `dst` was free when checked.
    fn move_file(&self, src: &Path, dst: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs` and `walkdir`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn entry_exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        // dunce avoids `\\?\` verbatim prefixes on Windows.
        dunce::canonicalize(path)
    }

    fn list_files(&self, root: &Path, exclude: Option<&Path>) -> io::Result<Vec<PathBuf>> {
        // Opening the root up front turns "cannot start" into a clear error.
        fs::read_dir(root)?;

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| exclude.is_none_or(|x| e.path() != x));
        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn move_file(&self, src: &Path, dst: &Path) -> io::Result<()> {
        super::file_move::move_file(src, dst)
    }
}
