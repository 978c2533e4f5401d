//! Request and result types exchanged with callers.
//! - MoveRequest: the two directories supplied by a client.
//! - MoveFailure: one file that could not be moved, and why.
//! - MoveSummary: the outcome of a whole relocation run.
//!
//! Field names serialize in camelCase (`searchDirectory`, `totalFiles`, ...)
//! so existing HTTP clients keep working.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Directories for one relocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    // Missing or null fields deserialize as empty so validation can report them by name.
    #[serde(default, deserialize_with = "null_as_empty")]
    search_directory: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    destination_directory: String,
}

/// A single validation problem with a request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: &'static str,
}

impl MoveRequest {
    pub fn new(
        search_directory: impl Into<String>,
        destination_directory: impl Into<String>,
    ) -> Self {
        Self {
            search_directory: search_directory.into(),
            destination_directory: destination_directory.into(),
        }
    }

    pub fn search_directory(&self) -> &str {
        &self.search_directory
    }

    pub fn destination_directory(&self) -> &str {
        &self.destination_directory
    }

    /// Check that both directories are present and not blank.
    /// Returns an empty list when the request is usable.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if self.search_directory.trim().is_empty() {
            issues.push(FieldIssue {
                field: "searchDirectory",
                message: "The search directory is required.",
            });
        }
        if self.destination_directory.trim().is_empty() {
            issues.push(FieldIssue {
                field: "destinationDirectory",
                message: "The destination directory is required.",
            });
        }
        issues
    }
}

/// A file that could not be moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFailure {
    #[serde(serialize_with = "serialize_path_lossy")]
    pub source: PathBuf,
    #[serde(serialize_with = "serialize_path_lossy")]
    pub destination: PathBuf,
    pub reason: String,
}

/// Outcome of a relocation run.
///
/// Built once at the end of a run; `total_files == moved_files + failed_files` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSummary {
    total_files: usize,
    moved_files: usize,
    failed_files: usize,
    failures: Vec<MoveFailure>,
}

impl MoveSummary {
    pub fn new(moved_files: usize, failures: Vec<MoveFailure>) -> Self {
        let failed_files = failures.len();
        Self {
            total_files: moved_files + failed_files,
            moved_files,
            failed_files,
            failures,
        }
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    pub fn moved_files(&self) -> usize {
        self.moved_files
    }

    pub fn failed_files(&self) -> usize {
        self.failed_files
    }

    /// Failures in the order the files were encountered.
    pub fn failures(&self) -> &[MoveFailure] {
        &self.failures
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}
