//! Filesystem operations used by the relocation engine.

mod copy;
mod duplicate;
mod file_move;
mod helpers;
mod provider;

pub use duplicate::resolve_destination;
pub use file_move::move_file;
pub use helpers::{io_error_hint, io_error_with_help};
pub use provider::{FileSystem, StdFileSystem};
