//! Typed error definitions for file_relocator.
//! Only setup failures live here; a file that fails to move is recorded in the
//! summary instead of being raised.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("Search directory '{}' does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl RelocateError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        RelocateError::Io {
            context: context.into(),
            source,
        }
    }

    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            RelocateError::DirectoryNotFound(_) => 10,
            RelocateError::InvalidArgument(_) => 20,
            RelocateError::Io { .. } => 30,
        }
    }

    /// Short machine-friendly label for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RelocateError::DirectoryNotFound(_) => "directory_not_found",
            RelocateError::InvalidArgument(_) => "invalid_argument",
            RelocateError::Io { .. } => "io_failure",
        }
    }
}
