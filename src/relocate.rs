//! Relocation engine.
//!
//! Moves every regular file under a search directory into one flat destination
//! directory. Setup problems (blank paths, missing source, same directory, destination not
//! creatable, tree not listable) fail the whole run before any file is touched.
//! Once moving starts, a failing file is recorded in the summary and the run
//! continues with the next one.
//!
//! Runs are sequential and blocking. Destination names are picked by checking
//! existence and then moving, which is not atomic against other processes
//! writing into the same destination at the same time.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::PathComparison;
use crate::errors::RelocateError;
use crate::fs_ops::{
    FileSystem, StdFileSystem, io_error_hint, io_error_with_help, resolve_destination,
};
use crate::model::{MoveFailure, MoveRequest, MoveSummary};
use crate::normalize::normalize;

/// Engine options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelocateOptions {
    /// Case policy for the "destination must differ from source" check.
    pub path_comparison: PathComparison,
}

/// Stateless relocation engine; cheap to share behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Relocator<F = StdFileSystem> {
    fs: F,
    options: RelocateOptions,
}

impl Relocator<StdFileSystem> {
    pub fn new(options: RelocateOptions) -> Self {
        Self {
            fs: StdFileSystem,
            options,
        }
    }
}

impl<F: FileSystem> Relocator<F> {
    /// Use a custom filesystem provider.
    pub fn with_filesystem(fs: F, options: RelocateOptions) -> Self {
        Self { fs, options }
    }

    /// Run one relocation.
    pub fn move_all(&self, request: &MoveRequest) -> Result<MoveSummary, RelocateError> {
        // Blank paths would resolve against the working directory.
        let issues = request.validate();
        if !issues.is_empty() {
            let message = issues.iter().map(|i| i.message).collect::<Vec<_>>().join(" ");
            return Err(RelocateError::InvalidArgument(message));
        }

        let search = PathBuf::from(normalize(request.search_directory()));
        let destination = PathBuf::from(normalize(request.destination_directory()));

        if !self.fs.is_dir(&search) {
            warn!(search = %search.display(), "Search directory not found");
            return Err(RelocateError::DirectoryNotFound(search));
        }

        let search_real = self.resolve_location(&search);
        let dest_real = self.resolve_location(&destination);
        if same_location(&search_real, &dest_real, self.options.path_comparison.ignores_case()) {
            return Err(RelocateError::InvalidArgument(format!(
                "destination must differ from source: both resolve to '{}'",
                search_real.display()
            )));
        }

        self.fs
            .create_dir_all(&destination)
            .map_err(io_error_with_help("create destination directory", &destination))?;

        // A destination nested in the search tree must not feed its own files back in.
        let exclude = self
            .fs
            .canonicalize(&destination)
            .ok()
            .and_then(|d| d.strip_prefix(&search_real).ok().map(|rel| search.join(rel)))
            .filter(|x| x != &search);

        let files = self
            .fs
            .list_files(&search, exclude.as_deref())
            .map_err(io_error_with_help("list files under", &search))?;

        info!(
            search = %search.display(),
            destination = %destination.display(),
            files = files.len(),
            "Relocating files"
        );

        let mut moved = 0usize;
        let mut failures = Vec::new();
        for src in files {
            let Some(name) = src.file_name() else {
                debug!(path = %src.display(), "Skipping entry without a file name");
                continue;
            };
            let dest = self.destination_for(&destination, name);

            match self.fs.move_file(&src, &dest) {
                Ok(()) => {
                    debug!(src = %src.display(), dest = %dest.display(), "Moved file");
                    moved += 1;
                }
                Err(e) => {
                    let hint = io_error_hint(&e).unwrap_or("");
                    warn!(
                        src = %src.display(),
                        dest = %dest.display(),
                        error = %e,
                        hint,
                        "Failed to move file"
                    );
                    failures.push(MoveFailure {
                        source: src,
                        destination: dest,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let summary = MoveSummary::new(moved, failures);
        info!(
            total = summary.total_files(),
            moved = summary.moved_files(),
            failed = summary.failed_files(),
            "Relocation finished"
        );
        Ok(summary)
    }

    fn destination_for(&self, dst_dir: &Path, name: &OsStr) -> PathBuf {
        resolve_destination(&self.fs, dst_dir, name)
    }

    /// Absolute, symlink-resolved form when the path exists; lexically cleaned otherwise.
    fn resolve_location(&self, path: &Path) -> PathBuf {
        if let Ok(real) = self.fs.canonicalize(path) {
            return real;
        }
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        lexical_clean(&absolute)
    }
}

/// Drop `.` and resolve `..` without touching the filesystem.
fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(comp);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Compare two resolved directories, ignoring trailing separators.
fn same_location(a: &Path, b: &Path, ignore_case: bool) -> bool {
    let a = trim_trailing_separators(&a.to_string_lossy()).to_owned();
    let b = trim_trailing_separators(&b.to_string_lossy()).to_owned();
    if ignore_case {
        a.to_lowercase() == b.to_lowercase()
    } else {
        a == b
    }
}

fn trim_trailing_separators(s: &str) -> &str {
    let trimmed = s.trim_end_matches(['/', '\\']);
    // Keep a bare root ("/" or "C:\") intact.
    if trimmed.is_empty() || trimmed.ends_with(':') {
        s
    } else {
        trimmed
    }
}
