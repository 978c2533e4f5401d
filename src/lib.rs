//! Core library for `file_relocator`.
//!
//! Moves every file found under a search directory into a single destination
//! directory, renaming on collision (`a.txt`, `a (1).txt`, ...) and reporting
//! which files moved and which did not.
//!
//! ```no_run
//! use file_relocator::{MoveRequest, RelocateOptions, Relocator};
//!
//! let relocator = Relocator::new(RelocateOptions::default());
//! let summary = relocator.move_all(&MoveRequest::new("/data/incoming", "/data/sorted"))?;
//! println!("{} moved, {} failed", summary.moved_files(), summary.failed_files());
//! # Ok::<(), file_relocator::RelocateError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod http;
pub mod model;
pub mod normalize;
pub mod output;
pub mod platform;
pub mod relocate;

pub use config::{
    Config, LogLevel, PathComparison, default_config_path, load_config, path_has_symlink_ancestor,
};
pub use errors::RelocateError;
pub use model::{FieldIssue, MoveFailure, MoveRequest, MoveSummary};
pub use normalize::{normalize, normalize_with};
pub use relocate::{RelocateOptions, Relocator};
