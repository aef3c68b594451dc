//! Tracing subscriber setup.
//!
//! Commands log to stderr. The dashboard owns the terminal, so it logs to a
//! file under the user's data directory instead.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Build the log filter from the verbosity flags.
///
/// `RUST_LOG` is honored only when neither flag is given.
pub fn filter(verbose: bool, quiet: bool) -> EnvFilter {
    if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Log to stderr.
pub fn init_stderr(verbose: bool, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose, quiet))
        .with_writer(std::io::stderr)
        .init();
}

/// Default dashboard log file.
pub fn log_file_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("farmwatch")
        .join("farmwatch.log")
}

/// Log to the dashboard log file. Returns the file path.
pub fn init_file(verbose: bool, quiet: bool) -> Result<PathBuf> {
    let path = log_file_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose, quiet))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_location() {
        let path = log_file_path();
        assert!(path.ends_with("farmwatch/farmwatch.log"));
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(filter(true, true).to_string(), "warn");
        assert_eq!(filter(true, false).to_string(), "debug");
    }
}
