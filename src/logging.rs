//! Logging setup
//!
//! The TUI owns the terminal, so interactive front-ends log to a file; the
//! one-shot CLI logs to stderr. Filtering follows `HNSEARCH_LOG`, then
//! `RUST_LOG`, then the configured default level.

use crate::error::{HnSearchError, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive used when no env variable is set, e.g. `info`
    pub default_filter: String,
    pub target: LogTarget,
}

impl LogConfig {
    /// Log to stderr, quiet by default
    pub fn stderr() -> Self {
        Self {
            default_filter: "warn".to_string(),
            target: LogTarget::Stderr,
        }
    }

    /// Log to a file: `HNSEARCH_LOG_FILE` or the default log path
    pub fn file() -> Self {
        let path = std::env::var_os("HNSEARCH_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_log_path);
        Self {
            default_filter: "info".to_string(),
            target: LogTarget::File(path),
        }
    }

    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        match verbose {
            0 => {}
            1 => self.default_filter = "info".to_string(),
            2 => self.default_filter = "debug".to_string(),
            _ => self.default_filter = "trace".to_string(),
        }
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_env("HNSEARCH_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// `<local data dir>/hnsearch/hnsearch.log`
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("hnsearch")
        .join("hnsearch.log")
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(config.filter());

    match &config.target {
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false);
            registry
                .with(layer)
                .try_init()
                .map_err(|e| HnSearchError::Logging(e.to_string()))?;
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true) // start fresh each run
                .open(path)?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_names(true);
            registry
                .with(layer)
                .try_init()
                .map_err(|e| HnSearchError::Logging(e.to_string()))?;
        }
    }

    tracing::info!(version = crate::VERSION, target = ?config.target, "logging initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_default_filter() {
        assert_eq!(LogConfig::stderr().default_filter, "warn");
        assert_eq!(LogConfig::stderr().with_verbosity(1).default_filter, "info");
        assert_eq!(LogConfig::stderr().with_verbosity(2).default_filter, "debug");
        assert_eq!(LogConfig::stderr().with_verbosity(9).default_filter, "trace");
    }

    #[test]
    fn default_log_path_ends_in_app_dir() {
        let path = default_log_path();
        assert!(path.ends_with("hnsearch/hnsearch.log"));
    }
}
