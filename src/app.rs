//! Application orchestrator.
//! Loads/merges config, initializes logging, then either serves the HTTP API or
//! runs one relocation and prints its summary.
//!
//! Exit status: 0 when every file moved, 2 when some files failed, 1 on setup errors.

use anyhow::{Context, Result, bail};
use std::process::ExitCode;
use tracing::{debug, error};

use file_relocator::cli::Args;
use file_relocator::config::CONFIG_ENV_VAR;
use file_relocator::output as out;
use file_relocator::{RelocateOptions, Relocator, default_config_path, http, load_config};

use crate::logging::init_tracing;

const EXIT_PARTIAL: u8 = 2;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(ExitCode::SUCCESS);
    }

    // CLI flags win over XML values.
    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg)?;

    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .context("initialize logging")?;
    debug!(?args, ?cfg, "Starting file_relocator");

    let relocator = Relocator::new(RelocateOptions {
        path_comparison: cfg.path_comparison,
    });

    if args.serve {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("start async runtime")?;
        runtime.block_on(http::serve(cfg.bind_address, relocator))?;
        return Ok(ExitCode::SUCCESS);
    }

    let request = args.move_request();
    let issues = request.validate();
    if !issues.is_empty() {
        for issue in &issues {
            out::print_error(issue.message);
        }
        bail!("missing required arguments (see --help)");
    }

    match relocator.move_all(&request) {
        Ok(summary) => {
            if args.json {
                out::print_user(&serde_json::to_string_pretty(&summary)?);
            } else {
                out::print_summary(&summary);
            }
            if summary.failed_files() > 0 {
                Ok(ExitCode::from(EXIT_PARTIAL))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Err(e) => {
            error!(code = e.code(), kind = e.kind(), error = %e, "Relocation failed");
            Err(e.into())
        }
    }
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV_VAR) {
        out::print_info(&format!("Using {CONFIG_ENV_VAR} (explicit):\n  {cfg_env}\n"));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default file_relocator config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults are used.");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}
