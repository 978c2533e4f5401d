use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::model::MoveSummary;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn is_err_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_err_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_err_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Print a plain line (no prefix) for output users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Human-readable summary on stdout: one headline plus one line per failed file.
pub fn print_summary(summary: &MoveSummary) {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    // A closed stdout is not worth failing the run over.
    let _ = write_summary(&mut lock, summary, is_tty());
}

fn write_summary<W: Write>(w: &mut W, summary: &MoveSummary, color: bool) -> io::Result<()> {
    let headline = format!(
        "{} of {} file(s) moved, {} failed",
        summary.moved_files(),
        summary.total_files(),
        summary.failed_files()
    );
    let (label, failed) = if summary.failed_files() == 0 {
        ("ok:", false)
    } else {
        ("warn:", true)
    };
    match (color, failed) {
        (true, false) => writeln!(w, "{} {}", label.green().bold(), headline)?,
        (true, true) => writeln!(w, "{} {}", label.yellow().bold(), headline)?,
        (false, _) => writeln!(w, "{} {}", label, headline)?,
    }
    for f in summary.failures() {
        writeln!(
            w,
            "  {} -> {}: {}",
            f.source.display(),
            f.destination.display(),
            f.reason
        )?;
    }
    Ok(())
}
