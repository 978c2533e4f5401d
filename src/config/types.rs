//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.
//! - PathComparison decides how "same directory" checks treat letter case.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use super::BIND_ADDRESS_DEFAULT;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Case policy for deciding whether two directories are the same location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathComparison {
    /// Compare paths byte-for-byte.
    CaseSensitive,
    /// Compare paths ignoring letter case.
    CaseInsensitive,
    /// Case-insensitive on Windows and macOS, case-sensitive elsewhere.
    #[default]
    Platform,
}

impl PathComparison {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "case-sensitive" | "sensitive" => Some(PathComparison::CaseSensitive),
            "case-insensitive" | "insensitive" => Some(PathComparison::CaseInsensitive),
            "platform" | "auto" => Some(PathComparison::Platform),
            _ => None,
        }
    }

    /// Resolve `Platform` to the concrete policy for this build target.
    pub fn ignores_case(self) -> bool {
        match self {
            PathComparison::CaseSensitive => false,
            PathComparison::CaseInsensitive => true,
            PathComparison::Platform => crate::platform::case_insensitive_by_default(),
        }
    }
}

impl fmt::Display for PathComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PathComparison::CaseSensitive => "case-sensitive",
            PathComparison::CaseInsensitive => "case-insensitive",
            PathComparison::Platform => "platform",
        };
        f.write_str(s)
    }
}

impl FromStr for PathComparison {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid path comparison: '{s}'"))
    }
}

/// Runtime configuration for the CLI and HTTP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Case policy for the source/destination equality check
    pub path_comparison: PathComparison,
    /// Listen address for `--serve`
    pub bind_address: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Normal,
            log_file: None,
            path_comparison: PathComparison::Platform,
            bind_address: SocketAddr::from(BIND_ADDRESS_DEFAULT),
        }
    }
}
