//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - --serve ignores the directory flags; each HTTP request carries its own.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueHint};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel, PathComparison};
use crate::model::MoveRequest;

/// Move every file under a directory tree into one destination folder.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Flatten a directory tree into a destination folder with collision-safe names"
)]
pub struct Args {
    /// Directory to search recursively for files.
    #[arg(long, short = 's', value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub search_directory: Option<String>,

    /// Directory that receives every file (created if missing).
    #[arg(long, short = 'd', value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub destination_directory: Option<String>,

    /// Case policy for the same-directory check: case-sensitive, case-insensitive or platform.
    #[arg(long, value_name = "POLICY")]
    pub path_comparison: Option<String>,

    /// Run the HTTP API instead of a single relocation.
    #[arg(long)]
    pub serve: bool,

    /// Listen address for --serve (overrides config).
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Append logs to this file as well as stderr.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Print where the config file is looked up (or $FILE_RELOCATOR_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Emit logs and the summary as JSON.
    #[arg(long, help = "Emit logs and the summary as JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Result<Option<LogLevel>> {
        if self.debug {
            return Ok(Some(LogLevel::Debug));
        }
        self.log_level
            .as_deref()
            .map(|s| s.parse::<LogLevel>().map_err(|e| anyhow!(e)))
            .transpose()
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) -> Result<()> {
        if let Some(level) = self.effective_log_level()? {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(pc) = self.path_comparison.as_deref() {
            cfg.path_comparison = pc.parse::<PathComparison>().map_err(|e| anyhow!(e))?;
        }
        if let Some(bind) = self.bind.as_deref() {
            cfg.bind_address = bind
                .parse::<SocketAddr>()
                .with_context(|| format!("invalid --bind address '{bind}'"))?;
        }
        Ok(())
    }

    /// Request built from the directory flags; absent flags become empty strings
    /// so validation can name them.
    pub fn move_request(&self) -> MoveRequest {
        MoveRequest::new(
            self.search_directory.clone().unwrap_or_default(),
            self.destination_directory.clone().unwrap_or_default(),
        )
    }
}

pub fn parse() -> Args {
    Args::parse()
}
