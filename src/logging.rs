//! Tracing set-up.
//!
//! The terminal UI owns the screen, so in TUI mode events go to a log file
//! under the local data directory. CLI commands log to stderr.

use crate::error::{PromptBoxError, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Append to `promptbox.log`; silently discard if it cannot be opened
    File,
    Stderr,
}

pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("promptbox").join("promptbox.log"))
}

/// `RUST_LOG` wins over the configured level; an unparsable level falls
/// back to `info`.
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Returns the log file in use, if any.
pub fn init(default_level: &str, output: LogOutput) -> Result<Option<PathBuf>> {
    let filter = build_filter(default_level);

    match output {
        LogOutput::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| PromptBoxError::Logging(e.to_string()))?;
            Ok(None)
        }
        LogOutput::File => match open_log_file() {
            Some((path, file)) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init()
                    .map_err(|e| PromptBoxError::Logging(e.to_string()))?;
                Ok(Some(path))
            }
            None => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::sink)
                    .try_init()
                    .map_err(|e| PromptBoxError::Logging(e.to_string()))?;
                Ok(None)
            }
        },
    }
}

fn open_log_file() -> Option<(PathBuf, fs::File)> {
    let path = log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    Some((path, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_under_promptbox_dir() {
        if let Some(path) = log_file_path() {
            assert!(path.ends_with("promptbox/promptbox.log"));
        }
    }
}
