//! Directory path normalization.
//! Pure string transformation applied to user input before any filesystem access:
//! - trims surrounding whitespace
//! - converts `/` and `\` to the native separator
//! - collapses repeated separators, keeping a leading network-share prefix (`\\server`)

use std::path::MAIN_SEPARATOR;

/// Normalize `path` for the current platform.
///
/// Empty or whitespace-only input is returned unchanged; callers decide
/// whether that is an error.
pub fn normalize(path: &str) -> String {
    normalize_with(path, MAIN_SEPARATOR)
}

/// Normalize `path` using `separator` as the native separator.
pub fn normalize_with(path: &str, separator: char) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return path.to_string();
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars().peekable();
    let mut prev_sep = false;

    // Network-share prefix: keep exactly two leading separators.
    let mut head = trimmed.chars();
    if matches!(
        (head.next(), head.next()),
        (Some(a), Some(b)) if is_separator(a) && is_separator(b)
    ) {
        out.push(separator);
        out.push(separator);
        while chars.next_if(|c| is_separator(*c)).is_some() {}
        prev_sep = true;
    }

    for c in chars {
        if is_separator(c) {
            if !prev_sep {
                out.push(separator);
            }
            prev_sep = true;
        } else {
            out.push(c);
            prev_sep = false;
        }
    }
    out
}

#[inline]
fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}
