//! hnsearch GUI Entry Point
//!
//! Launches the desktop window for searching stories.

#![cfg_attr(windows, windows_subsystem = "windows")]

use hnsearch::logging::{self, LogConfig};
use hnsearch::AppConfig;

fn main() {
    // No console to report to, so a logging failure is ignored
    let _ = logging::init(&LogConfig::file());
    tracing::info!(version = hnsearch::VERSION, "hnsearch GUI starting up");

    let config = AppConfig::from_env();
    if let Err(e) = hnsearch::gui::run(&config) {
        tracing::error!(error = %e, "GUI exited with an error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
