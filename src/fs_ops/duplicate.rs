//! Collision-free destination naming.
//!
//! Policy: `name.ext` if free, otherwise `name (1).ext`, `name (2).ext`, ...
//! The first unused candidate wins; the search never gives up.
//!
//! Notes:
//! - Existence is checked through the [`FileSystem`] provider at call time only.
//!   Another process can still claim the name before the move happens; the
//!   guarantee holds for a single relocation run with no outside writers.
//! - The suffix goes before the last extension: "archive.tar.gz" -> "archive.tar (1).gz".

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::trace;

use super::provider::FileSystem;

/// Return `dst_dir/name`, or the first free `dst_dir/stem (N).ext` for N = 1, 2, ...
pub fn resolve_destination<F: FileSystem + ?Sized>(
    fs: &F,
    dst_dir: &Path,
    name: &OsStr,
) -> PathBuf {
    let candidate = dst_dir.join(name);
    if !fs.entry_exists(&candidate) {
        return candidate;
    }

    // Extract stem and extension, preserving non-UTF8 via OsString.
    let base = Path::new(name);
    let stem: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| name.to_os_string());
    let ext: Option<OsString> = base.extension().map(|e| e.to_os_string());

    let mut n: u64 = 1;
    loop {
        let suffix = format!(" ({n})");
        let candidate = dst_dir.join(build_name_with_suffix(&stem, ext.as_deref(), &suffix));
        if !fs.entry_exists(&candidate) {
            return candidate;
        }
        if n % 100 == 0 {
            trace!(
                name = ?name,
                dir = %dst_dir.display(),
                tried = n,
                "duplicate: still searching for a free name"
            );
        }
        n += 1;
    }
}

// Conservative filename limits (bytes/characters, platform-specific and approximate).
#[cfg(windows)]
const MAX_FILENAME_LEN: usize = 240;
#[cfg(not(windows))]
const MAX_FILENAME_LEN: usize = 255;

#[cfg(unix)]
fn name_len_units(s: &OsStr) -> usize {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().len()
}

#[cfg(not(unix))]
fn name_len_units(s: &OsStr) -> usize {
    s.to_string_lossy().len()
}

/// Join `stem + suffix + [".ext"]`, shortening the stem when the result would
/// exceed MAX_FILENAME_LEN.
fn build_name_with_suffix(stem: &OsStr, ext: Option<&OsStr>, suffix: &str) -> OsString {
    let mut overhead = suffix.len();
    let mut ext_part = OsString::new();
    if let Some(e) = ext {
        overhead = overhead.saturating_add(1 + name_len_units(e));
        ext_part.push(".");
        ext_part.push(e);
    }

    let mut stem_os = stem.to_os_string();
    if name_len_units(stem) + overhead > MAX_FILENAME_LEN {
        let budget = MAX_FILENAME_LEN.saturating_sub(overhead).max(1);
        stem_os = truncate_stem(stem, budget);
    }

    let mut new_name = stem_os;
    new_name.push(suffix);
    new_name.push(&ext_part);
    new_name
}

fn truncate_stem(stem: &OsStr, budget: usize) -> OsString {
    // UTF-8 names are cut on a char boundary.
    if let Some(s) = stem.to_str() {
        let mut end = 0;
        for (idx, ch) in s.char_indices() {
            if idx + ch.len_utf8() > budget {
                break;
            }
            end = idx + ch.len_utf8();
        }
        let cut = if end == 0 { "f" } else { &s[..end] };
        return OsString::from(cut);
    }

    #[cfg(unix)]
    {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};
        let bytes = stem.as_bytes();
        OsString::from_vec(bytes[..bytes.len().min(budget)].to_vec())
    }
    #[cfg(not(unix))]
    {
        let lossy = stem.to_string_lossy();
        truncate_stem(OsStr::new(lossy.as_ref()), budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_goes_before_extension() {
        let n = build_name_with_suffix(OsStr::new("movie"), Some(OsStr::new("mkv")), " (3)");
        assert_eq!(n, OsString::from("movie (3).mkv"));
    }

    #[test]
    fn no_extension_appends_suffix() {
        let n = build_name_with_suffix(OsStr::new("README"), None, " (1)");
        assert_eq!(n, OsString::from("README (1)"));
    }

    #[test]
    fn long_stem_is_truncated_to_fit() {
        let stem = "x".repeat(400);
        let n = build_name_with_suffix(OsStr::new(&stem), Some(OsStr::new("txt")), " (12)");
        let s = n.to_str().unwrap();
        assert_eq!(s.len(), MAX_FILENAME_LEN);
        assert!(s.ends_with(" (12).txt"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let stem = "é".repeat(200); // 400 bytes
        let n = build_name_with_suffix(OsStr::new(&stem), Some(OsStr::new("md")), " (1)");
        let s = n.to_str().unwrap();
        assert!(s.len() <= MAX_FILENAME_LEN);
        assert!(s.ends_with(" (1).md"));
    }
}
